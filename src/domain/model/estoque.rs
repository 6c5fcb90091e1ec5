use super::insumo::{GradeCadastrada, Insumo, Produto};
use crate::core::pagination::{push_text, push_value, QueryParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Estoque {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub insumo: Option<Insumo>,
    pub produto: Option<Produto>,
    pub unidade_medida: String,
    pub quantidade: f64,
    pub grades: Vec<GradeCadastrada>,
    pub lotes: Vec<LoteEstoque>,
}

impl Estoque {
    pub fn nome_item(&self) -> &str {
        self.insumo
            .as_ref()
            .map(|i| i.nome.as_str())
            .or_else(|| self.produto.as_ref().map(|p| p.nome.as_str()))
            .unwrap_or("")
    }

    /// Stock value at each lot's unit cost.
    pub fn valor_total(&self) -> f64 {
        self.lotes.iter().map(LoteEstoque::valor).sum()
    }

    pub fn lotes_com_saldo(&self) -> impl Iterator<Item = &LoteEstoque> {
        self.lotes.iter().filter(|l| l.quantidade > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoteEstoque {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estoque: Option<Box<Estoque>>,
    pub unidade_medida: String,
    pub quantidade: f64,
    pub validade: Option<String>,
    pub grades: Vec<GradeCadastrada>,
    pub custo_unitario: f64,
}

impl LoteEstoque {
    pub fn valor(&self) -> f64 {
        self.quantidade * self.custo_unitario
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovimentacaoEstoque {
    pub id: Option<i64>,
    pub lote_estoque: Option<LoteEstoque>,
    pub quantidade: f64,
    pub tipo: String,
    pub data_movimentacao: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosEstoque {
    pub texto_busca: Option<String>,
    pub validade_minima: Option<String>,
    pub validade_maxima: Option<String>,
    pub fabricacao_minima: Option<String>,
    pub fabricacao_maxima: Option<String>,
    pub unidade_medida: Option<String>,
    pub somente_lotes_com_estoque: bool,
}

impl QueryParams for FiltrosEstoque {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "textoBusca", &self.texto_busca);
        if self.somente_lotes_com_estoque {
            pairs.push(("someLotesComEstoque", "true".to_string()));
        }
        push_text(&mut pairs, "fabricacaoMinima", &self.fabricacao_minima);
        push_text(&mut pairs, "fabricacaoMaxima", &self.fabricacao_maxima);
        push_text(&mut pairs, "validadeMinima", &self.validade_minima);
        push_text(&mut pairs, "validadeMaxima", &self.validade_maxima);
        push_text(&mut pairs, "unidadeMedida", &self.unidade_medida);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiltrosMovimentacao {
    pub estoque_id: i64,
    pub tipo: Option<String>,
}

impl QueryParams for FiltrosMovimentacao {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("estoqueId", self.estoque_id.to_string())];
        push_text(&mut pairs, "tipo", &self.tipo);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosLote {
    pub validade_minima: Option<String>,
    pub quantidade_minima: Option<f64>,
}

impl QueryParams for FiltrosLote {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "validadeMinima", &self.validade_minima);
        push_value(&mut pairs, "quantidadeMinima", &self.quantidade_minima);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estoque_totals() {
        let estoque: Estoque = serde_json::from_value(serde_json::json!({
            "id": 1,
            "produto": {"id": 4, "nome": "Vela aromática"},
            "unidadeMedida": "UNIDADE",
            "quantidade": 30,
            "lotes": [
                {"id": 10, "quantidade": 20, "custoUnitario": 2.5, "validade": "2025-01-31"},
                {"id": 11, "quantidade": 0, "custoUnitario": 3.0}
            ]
        }))
        .unwrap();

        assert_eq!(estoque.nome_item(), "Vela aromática");
        assert_eq!(estoque.valor_total(), 50.0);
        assert_eq!(estoque.lotes_com_saldo().count(), 1);
    }

    #[test]
    fn test_stock_filters() {
        let filtros = FiltrosEstoque {
            texto_busca: Some("lavanda".to_string()),
            somente_lotes_com_estoque: true,
            validade_minima: Some("2024-06-01".to_string()),
            ..FiltrosEstoque::default()
        };
        assert_eq!(
            filtros.query_pairs(),
            vec![
                ("textoBusca", "lavanda".to_string()),
                ("someLotesComEstoque", "true".to_string()),
                ("validadeMinima", "2024-06-01".to_string()),
            ]
        );

        let mov = FiltrosMovimentacao {
            estoque_id: 9,
            tipo: None,
        };
        assert_eq!(mov.query_pairs(), vec![("estoqueId", "9".to_string())]);
    }
}
