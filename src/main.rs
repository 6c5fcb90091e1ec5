use clap::Parser;
use insumos_admin::api::ApiClient;
use insumos_admin::config::{AdminConfig, Command, ListArgs};
use insumos_admin::core::export::{export_csv_file, CsvExportable};
use insumos_admin::core::masks::{mask_phone, phone_error};
use insumos_admin::core::{normalize_and_validate, Page, Pagination, Verdict};
use insumos_admin::domain::model::{
    FiltrosEntrada, FiltrosEstoque, FiltrosFormula, FiltrosInsumo, FiltrosPessoa, FiltrosUsuario,
};
use insumos_admin::utils::error::{AdminError, ErrorSeverity};
use insumos_admin::utils::{logger, validation::validate_path};
use insumos_admin::{CliConfig, CrudResource, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()).max(1));
        }
    };

    // 初始化日誌
    if config.logging.json && !cli.verbose {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting insumos-admin CLI");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(e.severity());
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn session(cli: &CliConfig) -> insumos_admin::Result<Session> {
    let token = cli
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AdminError::MissingConfigError {
            field: "token".to_string(),
        })?;
    Ok(Session::from_raw(token.trim()))
}

async fn run(cli: &CliConfig, config: &AdminConfig) -> insumos_admin::Result<()> {
    match &cli.command {
        Command::Documento { valor } => {
            let check = normalize_and_validate(valor);
            let tipo = check.kind.map(|k| k.label()).unwrap_or("?");
            match check.verdict {
                Verdict::Valid => println!("✅ {} {} válido", tipo, check.masked),
                Verdict::Incomplete => println!("… {} incompleto", check.masked),
                Verdict::Invalid => {
                    println!("❌ {}", check.error_message().unwrap_or_default());
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Command::Telefone { valor } => {
            println!("{}", mask_phone(valor));
            if let Some(message) = phone_error(valor) {
                eprintln!("❌ {}", message);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Login { username, password } => {
            let client = ApiClient::new(config)?;
            let session = client.auth().login(username, password).await?;
            if let Some(expires_at) = session.expires_at() {
                tracing::info!("Session valid until {}", expires_at);
            }
            println!("{}", session.token());
            Ok(())
        }
        Command::Logout => {
            let client = ApiClient::new(config)?;
            let message = client.auth().logout(session(cli)?).await?;
            println!("✅ {}", message);
            Ok(())
        }
        Command::Pessoas {
            nome,
            tipo,
            tipo_pessoa,
            cpf_cnpj,
            listagem,
        } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosPessoa {
                nome: nome.clone(),
                tipo: *tipo,
                tipo_pessoa: *tipo_pessoa,
                cpf_cnpj: cpf_cnpj.clone(),
            };
            let page = client
                .pessoas()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
        Command::Insumos {
            busca,
            tipo,
            listagem,
        } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosInsumo {
                texto_busca: busca.clone(),
                tipo: tipo.clone(),
            };
            let page = client
                .insumos()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
        Command::Estoques {
            busca,
            com_estoque,
            validade_minima,
            validade_maxima,
            unidade,
            listagem,
        } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosEstoque {
                texto_busca: busca.clone(),
                validade_minima: validade_minima.clone(),
                validade_maxima: validade_maxima.clone(),
                unidade_medida: unidade.clone(),
                somente_lotes_com_estoque: *com_estoque,
                ..FiltrosEstoque::default()
            };
            let page = client
                .estoque()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
        Command::Entradas {
            busca,
            fornecedor,
            inicio,
            fim,
            listagem,
        } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosEntrada {
                texto_busca: busca.clone(),
                fornecedor_id: *fornecedor,
                data_inicio: inicio.clone(),
                data_fim: fim.clone(),
            };
            let page = client
                .entradas()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
        Command::Formulas {
            busca,
            inicio,
            fim,
            listagem,
        } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosFormula {
                texto_busca: busca.clone(),
                data_inicio: inicio.clone(),
                data_fim: fim.clone(),
            };
            let page = client
                .formulas()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
        Command::Usuarios { busca, listagem } => {
            let client = ApiClient::new(config)?;
            let filtros = FiltrosUsuario {
                texto_busca: busca.clone(),
            };
            let page = client
                .usuarios()
                .list(&session(cli)?, &filtros, listagem.page_request(config))
                .await?;
            present(&page, listagem)
        }
    }
}

/// Prints the page, or writes it to the `--csv` file when one was given.
/// An empty page never produces a file.
fn present<T: CsvExportable>(page: &Page<T>, listagem: &ListArgs) -> insumos_admin::Result<()> {
    let mut pagination = Pagination::new(page.page.size);
    pagination.update_from(&page.page);

    if page.is_empty() {
        println!("Nenhum registro encontrado.");
        return Ok(());
    }

    if let Some(path) = &listagem.csv {
        validate_path("csv", &path.to_string_lossy())?;
        export_csv_file(&page.content, path)?;
        tracing::info!("📁 Output saved to: {}", path.display());
        println!(
            "✅ {} registros exportados para {} ({})",
            page.content.len(),
            path.display(),
            pagination.label()
        );
        return Ok(());
    }

    println!("{}", T::headers().join(" | "));
    for row in &page.content {
        println!("{}", row.to_csv_row().join(" | "));
    }
    println!(
        "{} ({} registros)",
        pagination.label(),
        page.page.total_elements
    );
    Ok(())
}
