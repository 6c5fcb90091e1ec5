pub mod toml_config;

pub use toml_config::AdminConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ListArgs};

#[cfg(feature = "cli")]
mod cli {
    use super::AdminConfig;
    use crate::core::pagination::PageRequest;
    use crate::domain::model::{TipoCadastro, TipoPessoa};
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "insumos-admin")]
    #[command(about = "Administração de cadastros, insumos e estoque")]
    pub struct CliConfig {
        #[arg(short, long, help = "Arquivo de configuração TOML")]
        pub config: Option<PathBuf>,

        #[arg(long, env = "INSUMOS_API_URL")]
        pub api_url: Option<String>,

        #[arg(long, env = "INSUMOS_AUTH_URL")]
        pub auth_url: Option<String>,

        #[arg(long, env = "INSUMOS_TOKEN", hide_env_values = true)]
        pub token: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Formata e valida um CPF ou CNPJ
        Documento { valor: String },
        /// Formata e valida um telefone
        Telefone { valor: String },
        /// Autentica e imprime o token da sessão
        Login {
            #[arg(short, long)]
            username: String,
            #[arg(short, long, env = "INSUMOS_PASSWORD", hide_env_values = true)]
            password: String,
        },
        /// Encerra a sessão do token informado
        Logout,
        Pessoas {
            #[arg(long)]
            nome: Option<String>,
            #[arg(long)]
            tipo: Option<TipoCadastro>,
            #[arg(long)]
            tipo_pessoa: Option<TipoPessoa>,
            #[arg(long)]
            cpf_cnpj: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
        Insumos {
            #[arg(long)]
            busca: Option<String>,
            #[arg(long)]
            tipo: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
        Estoques {
            #[arg(long)]
            busca: Option<String>,
            #[arg(long, help = "Somente itens com lotes em estoque")]
            com_estoque: bool,
            #[arg(long)]
            validade_minima: Option<String>,
            #[arg(long)]
            validade_maxima: Option<String>,
            #[arg(long)]
            unidade: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
        Entradas {
            #[arg(long)]
            busca: Option<String>,
            #[arg(long)]
            fornecedor: Option<i64>,
            #[arg(long)]
            inicio: Option<String>,
            #[arg(long)]
            fim: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
        Formulas {
            #[arg(long)]
            busca: Option<String>,
            #[arg(long)]
            inicio: Option<String>,
            #[arg(long)]
            fim: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
        Usuarios {
            #[arg(long)]
            busca: Option<String>,
            #[command(flatten)]
            listagem: ListArgs,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct ListArgs {
        #[arg(long, default_value_t = 0)]
        pub page: u32,

        #[arg(long)]
        pub size: Option<u32>,

        #[arg(long, help = "Exporta a página para um arquivo CSV")]
        pub csv: Option<PathBuf>,
    }

    impl ListArgs {
        pub fn page_request<C: ConfigProvider + ?Sized>(&self, config: &C) -> PageRequest {
            PageRequest {
                page: self.page,
                size: self.size.unwrap_or_else(|| config.default_page_size()),
            }
        }
    }

    impl CliConfig {
        /// File settings (or defaults) with the command-line URLs applied on top.
        pub fn resolve(&self) -> Result<AdminConfig> {
            let base = match &self.config {
                Some(path) => {
                    tracing::info!("Loading configuration from {}", path.display());
                    AdminConfig::from_file(path)?
                }
                None => AdminConfig::default(),
            };

            let config = base.with_overrides(self.api_url.clone(), self.auth_url.clone());
            config.validate()?;
            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_parse_list_command() {
            let cli = CliConfig::try_parse_from([
                "insumos-admin",
                "--api-url",
                "http://erp.local/api",
                "pessoas",
                "--tipo",
                "fornecedor",
                "--size",
                "20",
                "--csv",
                "pessoas.csv",
            ])
            .unwrap();

            match cli.command {
                Command::Pessoas { tipo, listagem, .. } => {
                    assert_eq!(tipo, Some(TipoCadastro::Fornecedor));
                    assert_eq!(listagem.size, Some(20));
                    assert_eq!(listagem.csv, Some(PathBuf::from("pessoas.csv")));
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_page_request_falls_back_to_configured_size() {
            let listagem = ListArgs {
                page: 2,
                size: None,
                csv: None,
            };
            let request = listagem.page_request(&AdminConfig::default());
            assert_eq!(request, PageRequest { page: 2, size: 10 });
        }

        #[test]
        fn test_resolve_applies_overrides_over_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(b"[api]\nbase_url = \"http://arquivo.local/api\"\npage_size = 50\n")
                .unwrap();

            let cli = CliConfig::try_parse_from([
                "insumos-admin",
                "--config",
                file.path().to_str().unwrap(),
                "--auth-url",
                "http://auth.local/api",
                "logout",
            ])
            .unwrap();

            let config = cli.resolve().unwrap();
            assert_eq!(config.api_url(), "http://arquivo.local/api");
            assert_eq!(config.auth_url(), "http://auth.local/api");
            assert_eq!(config.default_page_size(), 50);
        }

        #[test]
        fn test_resolve_rejects_bad_url() {
            let cli = CliConfig::try_parse_from([
                "insumos-admin",
                "--api-url",
                "not a url",
                "documento",
                "123",
            ])
            .unwrap();
            assert!(cli.resolve().is_err());
        }
    }
}
