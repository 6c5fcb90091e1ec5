use super::insumo::{GradeCadastrada, Insumo};
use super::pessoa::Pessoa;
use crate::core::pagination::{push_text, push_value, QueryParams};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{require, require_positive, require_text, Validate};
use serde::{Deserialize, Serialize};

pub const ENTRADA_CAMPOS_OBRIGATORIOS: &str = "Fornecedor e Data de Entrada são obrigatórios.";
pub const ITEM_CAMPOS_OBRIGATORIOS: &str = "Todos os campos são obrigatórios, exceto a validade.";

/// Lot created from one receipt line, with the quantity converted to the
/// stock unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoteEntrada {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub quantidade_convertida: f64,
    pub unidade_medida: String,
    pub validade: Option<String>,
    pub grades: Vec<GradeCadastrada>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntradaInsumoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub insumo: Option<Insumo>,
    pub fabricante: Option<Pessoa>,
    pub quantidade: f64,
    pub unidade_medida_entrada: Option<String>,
    pub preco_unitario: f64,
    pub validade: Option<String>,
    pub custo_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lote: Option<LoteEntrada>,
}

impl EntradaInsumoItem {
    pub fn custo(&self) -> f64 {
        self.preco_unitario * self.quantidade
    }
}

impl Validate for EntradaInsumoItem {
    fn validate(&self) -> Result<()> {
        require("insumo", self.insumo.as_ref(), ITEM_CAMPOS_OBRIGATORIOS)?;
        require("fabricante", self.fabricante.as_ref(), ITEM_CAMPOS_OBRIGATORIOS)?;
        require_positive("quantidade", self.quantidade, ITEM_CAMPOS_OBRIGATORIOS)?;
        require_positive("precoUnitario", self.preco_unitario, ITEM_CAMPOS_OBRIGATORIOS)?;
        require_text(
            "unidadeMedidaEntrada",
            self.unidade_medida_entrada.as_deref(),
            ITEM_CAMPOS_OBRIGATORIOS,
        )
    }
}

/// Incoming-goods receipt: one supplier, one date, many lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntradaInsumos {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub fornecedor: Option<Pessoa>,
    pub data_entrada: String,
    pub custo_frete: f64,
    pub custo_outros: f64,
    pub itens: Vec<EntradaInsumoItem>,
}

impl EntradaInsumos {
    /// Empty receipt dated today.
    pub fn new() -> Self {
        Self {
            data_entrada: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn custo_itens(&self) -> f64 {
        self.itens.iter().map(EntradaInsumoItem::custo).sum()
    }

    pub fn custo_total(&self) -> f64 {
        self.custo_frete + self.custo_outros + self.custo_itens()
    }

    /// Validates the line, fills its total and appends it.
    pub fn add_item(&mut self, mut item: EntradaInsumoItem) -> Result<()> {
        item.validate()?;
        item.custo_total = item.custo();
        self.itens.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Option<EntradaInsumoItem> {
        (index < self.itens.len()).then(|| self.itens.remove(index))
    }
}

impl Validate for EntradaInsumos {
    fn validate(&self) -> Result<()> {
        require("fornecedor", self.fornecedor.as_ref(), ENTRADA_CAMPOS_OBRIGATORIOS)?;
        require_text("dataEntrada", Some(&self.data_entrada), ENTRADA_CAMPOS_OBRIGATORIOS)?;
        if self.custo_frete < 0.0 || self.custo_outros < 0.0 {
            return Err(AdminError::validation(
                "custoFrete",
                "Custos não podem ser negativos.",
            ));
        }
        self.itens.iter().try_for_each(|item| item.validate())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosEntrada {
    pub texto_busca: Option<String>,
    pub fornecedor_id: Option<i64>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

impl QueryParams for FiltrosEntrada {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "textoBusca", &self.texto_busca);
        push_value(&mut pairs, "fornecedorId", &self.fornecedor_id);
        push_text(&mut pairs, "dataInicio", &self.data_inicio);
        push_text(&mut pairs, "dataFim", &self.data_fim);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::insumo::DetalhesInsumo;
    use crate::domain::model::pessoa::TipoCadastro;

    fn essencia() -> Insumo {
        Insumo {
            id: Some(1),
            nome: "Essência de bambu".to_string(),
            descricao: String::new(),
            unidade_medida: "MILILITRO".to_string(),
            fabricantes: vec![],
            fornecedores: vec![],
            grades: vec![],
            detalhes: DetalhesInsumo::MateriaPrima {
                tipo_materia_prima: "ESSENCIA".to_string(),
                especificacoes_tecnicas: String::new(),
            },
        }
    }

    fn item(quantidade: f64, preco: f64) -> EntradaInsumoItem {
        EntradaInsumoItem {
            insumo: Some(essencia()),
            fabricante: Some(Pessoa::new(TipoCadastro::Fabricante)),
            quantidade,
            unidade_medida_entrada: Some("LITRO".to_string()),
            preco_unitario: preco,
            ..EntradaInsumoItem::default()
        }
    }

    #[test]
    fn test_custo_total_includes_freight_and_other_costs() {
        let mut entrada = EntradaInsumos::new();
        entrada.custo_frete = 15.0;
        entrada.custo_outros = 4.5;
        entrada.add_item(item(2.0, 30.0)).unwrap();
        entrada.add_item(item(0.5, 10.0)).unwrap();

        assert_eq!(entrada.itens[0].custo_total, 60.0);
        assert_eq!(entrada.custo_itens(), 65.0);
        assert_eq!(entrada.custo_total(), 84.5);
    }

    #[test]
    fn test_incomplete_item_is_rejected() {
        let mut entrada = EntradaInsumos::new();
        let mut sem_unidade = item(1.0, 1.0);
        sem_unidade.unidade_medida_entrada = None;

        let err = entrada.add_item(sem_unidade).unwrap_err();
        assert_eq!(err.user_friendly_message(), ITEM_CAMPOS_OBRIGATORIOS);
        assert!(entrada.add_item(item(0.0, 1.0)).is_err());
        assert!(entrada.itens.is_empty());
    }

    #[test]
    fn test_receipt_requires_supplier() {
        let mut entrada = EntradaInsumos::new();
        let err = entrada.validate().unwrap_err();
        assert_eq!(err.user_friendly_message(), ENTRADA_CAMPOS_OBRIGATORIOS);

        entrada.fornecedor = Some(Pessoa::new(TipoCadastro::Fornecedor));
        assert!(entrada.validate().is_ok());
        assert_eq!(entrada.remove_item(0), None);
    }
}
