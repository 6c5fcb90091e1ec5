use super::insumo::Produto;
use crate::core::pagination::{push_text, QueryParams};
use crate::utils::error::Result;
use crate::utils::validation::{require, require_positive, require_text, Validate};
use serde::{Deserialize, Serialize};

const PROCESSO_INCOMPLETO: &str = "Informe insumo, porcentagem e tipo de processo.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessoFabricacao {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub insumo_id: Option<i64>,
    pub porcentagem: f64,
    pub tipo_processo: String,
}

impl Validate for ProcessoFabricacao {
    fn validate(&self) -> Result<()> {
        require("insumoId", self.insumo_id.as_ref(), PROCESSO_INCOMPLETO)?;
        require_positive("porcentagem", self.porcentagem, PROCESSO_INCOMPLETO)?;
        require_text("tipoProcesso", Some(&self.tipo_processo), PROCESSO_INCOMPLETO)
    }
}

/// Manufacturing formula as returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormulaFabricacao {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub produto_id: Option<i64>,
    pub produto: Option<Produto>,
    pub processos_fabricacao: Vec<ProcessoFabricacao>,
}

impl FormulaFabricacao {
    pub fn volume_total(&self) -> f64 {
        self.processos_fabricacao.iter().map(|p| p.porcentagem).sum()
    }

    /// Payload for editing this formula.
    pub fn to_request(&self) -> CriarFormulaFabricacao {
        let mut request = CriarFormulaFabricacao {
            produto_id: self.produto_id.or_else(|| self.produto.as_ref().and_then(|p| p.id)),
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            processos_fabricacao: self.processos_fabricacao.clone(),
            volume_total: 0.0,
        };
        request.refresh_volume_total();
        request
    }
}

/// Create/update payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriarFormulaFabricacao {
    pub produto_id: Option<i64>,
    pub nome: String,
    pub descricao: String,
    pub processos_fabricacao: Vec<ProcessoFabricacao>,
    pub volume_total: f64,
}

impl CriarFormulaFabricacao {
    pub fn add_processo(&mut self, processo: ProcessoFabricacao) -> Result<()> {
        processo.validate()?;
        self.processos_fabricacao.push(processo);
        self.refresh_volume_total();
        Ok(())
    }

    pub fn remove_processo(&mut self, index: usize) -> Option<ProcessoFabricacao> {
        let removed = (index < self.processos_fabricacao.len())
            .then(|| self.processos_fabricacao.remove(index));
        self.refresh_volume_total();
        removed
    }

    pub fn refresh_volume_total(&mut self) {
        self.volume_total = self.processos_fabricacao.iter().map(|p| p.porcentagem).sum();
    }
}

impl Validate for CriarFormulaFabricacao {
    fn validate(&self) -> Result<()> {
        require("produtoId", self.produto_id.as_ref(), "O produto é obrigatório.")?;
        require_text("nome", Some(&self.nome), "O nome da fórmula é obrigatório.")?;
        self.processos_fabricacao
            .iter()
            .try_for_each(|processo| processo.validate())
    }
}

/// Process option offered for a product family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessoOpcao {
    pub key: String,
    pub descricao: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoriaProcesso {
    DifusorVareta,
    HomeSpray,
    VelaAromatica,
    AguaLencois,
    Todos,
}

impl CategoriaProcesso {
    pub fn path_segment(self) -> &'static str {
        match self {
            CategoriaProcesso::DifusorVareta => "processos-difusor-vareta",
            CategoriaProcesso::HomeSpray => "processos-home-spray",
            CategoriaProcesso::VelaAromatica => "processos-vela-aromatica",
            CategoriaProcesso::AguaLencois => "processos-agua-lencois",
            CategoriaProcesso::Todos => "processos-fabricacao",
        }
    }
}

impl std::str::FromStr for CategoriaProcesso {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "difusor-vareta" => Ok(CategoriaProcesso::DifusorVareta),
            "home-spray" => Ok(CategoriaProcesso::HomeSpray),
            "vela-aromatica" => Ok(CategoriaProcesso::VelaAromatica),
            "agua-lencois" => Ok(CategoriaProcesso::AguaLencois),
            "todos" => Ok(CategoriaProcesso::Todos),
            other => Err(format!("categoria de processo desconhecida: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosFormula {
    pub texto_busca: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

impl QueryParams for FiltrosFormula {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "textoBusca", &self.texto_busca);
        push_text(&mut pairs, "dataInicio", &self.data_inicio);
        push_text(&mut pairs, "dataFim", &self.data_fim);
        pairs
    }
}
