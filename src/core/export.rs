//! CSV export of list pages, readable by spreadsheet tools.

use crate::core::document;
use crate::core::masks::{format_brl, format_date};
use crate::domain::model::{EntradaInsumos, Estoque, FormulaFabricacao, Insumo, Pessoa, Usuario};
use crate::utils::error::{AdminError, Result};
use std::io::Write;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Types that can be written as one CSV row.
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

/// Writes a BOM, the header row and one `;`-separated row per item.
pub fn export_csv<T: CsvExportable, W: Write>(rows: &[T], mut writer: W) -> Result<()> {
    if rows.is_empty() {
        return Err(AdminError::ExportError {
            message: "Nenhum dado para exportar".to_string(),
        });
    }

    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    csv_writer.write_record(T::headers())?;
    for row in rows {
        csv_writer.write_record(row.to_csv_row())?;
    }
    csv_writer.flush()?;

    tracing::debug!("Exported {} rows", rows.len());
    Ok(())
}

/// Exports into memory first; the file is only created once the export succeeded.
pub fn export_csv_file<T: CsvExportable, P: AsRef<Path>>(rows: &[T], path: P) -> Result<()> {
    let mut buffer = Vec::new();
    export_csv(rows, &mut buffer)?;
    std::fs::write(&path, buffer)?;
    Ok(())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl CsvExportable for Pessoa {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Nome", "CPF/CNPJ", "Tipo", "E-mail", "Telefone"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.nome_exibicao().to_string(),
            self.cpf_cnpj.as_deref().map(document::mask).unwrap_or_default(),
            self.tipo.map(|t| t.to_string()).unwrap_or_default(),
            text(&self.email),
            text(&self.telefone),
        ]
    }
}

impl CsvExportable for Insumo {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Nome", "Tipo", "Subtipo", "Unidade"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.nome.clone(),
            self.tipo().to_string(),
            self.detalhes.subtipo().to_string(),
            self.unidade_medida.clone(),
        ]
    }
}

impl CsvExportable for Estoque {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Item", "Quantidade", "Unidade", "Lotes", "Valor"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.nome_item().to_string(),
            self.quantidade.to_string(),
            self.unidade_medida.clone(),
            self.lotes.len().to_string(),
            format_brl(self.valor_total()),
        ]
    }
}

impl CsvExportable for EntradaInsumos {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Fornecedor", "Data", "Frete", "Outros", "Total"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.fornecedor
                .as_ref()
                .map(|f| f.nome_exibicao().to_string())
                .unwrap_or_default(),
            format_date(Some(&self.data_entrada)),
            format_brl(self.custo_frete),
            format_brl(self.custo_outros),
            format_brl(self.custo_total()),
        ]
    }
}

impl CsvExportable for FormulaFabricacao {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Nome", "Produto", "Processos", "Volume total (%)"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.nome.clone(),
            self.produto
                .as_ref()
                .map(|p| p.nome.clone())
                .unwrap_or_default(),
            self.processos_fabricacao.len().to_string(),
            self.volume_total().to_string(),
        ]
    }
}

impl CsvExportable for Usuario {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Nome", "E-mail", "Telefone", "Usuário"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.nome.clone(),
            self.email.clone(),
            self.telefone.clone(),
            self.login
                .as_ref()
                .map(|l| l.username.clone())
                .unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TipoCadastro;

    #[test]
    fn test_export_people() {
        let pessoas = vec![
            Pessoa {
                id: Some(1),
                razao_social: Some("Vidros; Frascos & Cia".to_string()),
                cpf_cnpj: Some("11222333000181".to_string()),
                email: Some("vendas@frascos.com.br".to_string()),
                ..Pessoa::new(TipoCadastro::Fornecedor)
            },
            Pessoa {
                id: Some(2),
                nome: Some("João".to_string()),
                ..Pessoa::new(TipoCadastro::Cliente)
            },
        ];

        let mut out = Vec::new();
        export_csv(&pessoas, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with('\u{FEFF}'));
        let lines: Vec<_> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "ID;Nome;CPF/CNPJ;Tipo;E-mail;Telefone");
        assert_eq!(
            lines[1],
            "1;\"Vidros; Frascos & Cia\";11.222.333/0001-81;FORNECEDOR;vendas@frascos.com.br;"
        );
        assert_eq!(lines[2], "2;João;;CLIENTE;;");
    }

    #[test]
    fn test_export_empty_is_error() {
        let mut out = Vec::new();
        let err = export_csv::<Usuario, _>(&[], &mut out).unwrap_err();
        assert!(matches!(err, AdminError::ExportError { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_export_file_is_not_created_for_empty_page() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("vazio.csv");

        let err = export_csv_file::<Pessoa, _>(&[], &path).unwrap_err();
        assert!(matches!(err, AdminError::ExportError { .. }));
        assert!(!path.exists());

        let pessoas = vec![Pessoa {
            nome: Some("Ana".to_string()),
            ..Pessoa::new(TipoCadastro::Cliente)
        }];
        export_csv_file(&pessoas, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(UTF8_BOM));
    }
}
