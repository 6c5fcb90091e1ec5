use super::pessoa::Pessoa;
use crate::core::pagination::{push_text, QueryParams};
use crate::utils::error::Result;
use crate::utils::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeCadastrada {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub valores: Vec<String>,
}

/// Key/label pair used by the enum lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcao {
    pub chave: String,
    pub valor: String,
}

/// Fields specific to each kind of input, keyed by `tipoInsumo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipoInsumo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetalhesInsumo {
    #[serde(rename_all = "camelCase")]
    Consumivel {
        #[serde(default)]
        tipo_consumivel: String,
        #[serde(default)]
        aplicacao: String,
    },
    #[serde(rename_all = "camelCase")]
    Embalagem {
        #[serde(default)]
        tipo_embalagem: String,
        #[serde(default)]
        dimensoes: String,
        #[serde(default)]
        material: String,
    },
    #[serde(rename_all = "camelCase")]
    MateriaPrima {
        #[serde(default)]
        tipo_materia_prima: String,
        #[serde(default)]
        especificacoes_tecnicas: String,
    },
    #[serde(rename_all = "camelCase")]
    Servico {
        #[serde(default)]
        tipo_servico: String,
        #[serde(default)]
        descricao_servico: String,
    },
}

impl DetalhesInsumo {
    pub fn tipo(&self) -> &'static str {
        match self {
            DetalhesInsumo::Consumivel { .. } => "CONSUMIVEL",
            DetalhesInsumo::Embalagem { .. } => "EMBALAGEM",
            DetalhesInsumo::MateriaPrima { .. } => "MATERIA_PRIMA",
            DetalhesInsumo::Servico { .. } => "SERVICO",
        }
    }

    pub fn subtipo(&self) -> &str {
        match self {
            DetalhesInsumo::Consumivel { tipo_consumivel, .. } => tipo_consumivel,
            DetalhesInsumo::Embalagem { tipo_embalagem, .. } => tipo_embalagem,
            DetalhesInsumo::MateriaPrima {
                tipo_materia_prima, ..
            } => tipo_materia_prima,
            DetalhesInsumo::Servico { tipo_servico, .. } => tipo_servico,
        }
    }
}

/// Raw material, packaging, consumable or service used in production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insumo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub unidade_medida: String,
    #[serde(default)]
    pub fabricantes: Vec<Pessoa>,
    #[serde(default)]
    pub fornecedores: Vec<Pessoa>,
    #[serde(default)]
    pub grades: Vec<GradeCadastrada>,
    #[serde(flatten)]
    pub detalhes: DetalhesInsumo,
}

impl Insumo {
    pub fn tipo(&self) -> &'static str {
        self.detalhes.tipo()
    }
}

impl Validate for Insumo {
    fn validate(&self) -> Result<()> {
        require_text("nome", Some(&self.nome), "O nome do insumo é obrigatório.")?;
        require_text(
            "unidadeMedida",
            Some(&self.unidade_medida),
            "A unidade de medida é obrigatória.",
        )?;
        require_text(
            "subtipo",
            Some(self.detalhes.subtipo()),
            "Selecione o subtipo do insumo.",
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosInsumo {
    pub texto_busca: Option<String>,
    pub tipo: Option<String>,
}

impl QueryParams for FiltrosInsumo {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "textoBusca", &self.texto_busca);
        push_text(&mut pairs, "tipo", &self.tipo);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Produto {
    pub id: Option<i64>,
    pub nome: String,
    pub descricao: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insumo_discriminator_round() {
        let json = serde_json::json!({
            "id": 12,
            "nome": "Essência de lavanda",
            "descricao": "Essência concentrada",
            "tipoInsumo": "MATERIA_PRIMA",
            "unidadeMedida": "MILILITRO",
            "tipoMateriaPrima": "ESSENCIA",
            "especificacoesTecnicas": "IFRA 51"
        });
        let insumo: Insumo = serde_json::from_value(json).unwrap();
        assert_eq!(insumo.tipo(), "MATERIA_PRIMA");
        assert_eq!(insumo.detalhes.subtipo(), "ESSENCIA");
        assert!(insumo.fabricantes.is_empty());

        let back = serde_json::to_value(&insumo).unwrap();
        assert_eq!(back["tipoInsumo"], "MATERIA_PRIMA");
        assert_eq!(back["especificacoesTecnicas"], "IFRA 51");
    }

    #[test]
    fn test_insumo_validation() {
        let mut insumo = Insumo {
            id: None,
            nome: "Frasco 100ml".to_string(),
            descricao: String::new(),
            unidade_medida: "UNIDADE".to_string(),
            fabricantes: vec![],
            fornecedores: vec![],
            grades: vec![],
            detalhes: DetalhesInsumo::Embalagem {
                tipo_embalagem: "FRASCO_VIDRO".to_string(),
                dimensoes: "5x5x12".to_string(),
                material: "vidro".to_string(),
            },
        };
        assert!(insumo.validate().is_ok());

        insumo.unidade_medida.clear();
        assert!(insumo.validate().is_err());
    }
}
