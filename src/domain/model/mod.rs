pub mod entrada;
pub mod estoque;
pub mod formula;
pub mod insumo;
pub mod pessoa;
pub mod usuario;

pub use entrada::{EntradaInsumoItem, EntradaInsumos, FiltrosEntrada, LoteEntrada};
pub use estoque::{Estoque, FiltrosEstoque, FiltrosLote, FiltrosMovimentacao, LoteEstoque, MovimentacaoEstoque};
pub use formula::{
    CategoriaProcesso, CriarFormulaFabricacao, FiltrosFormula, FormulaFabricacao, ProcessoFabricacao,
    ProcessoOpcao,
};
pub use insumo::{DetalhesInsumo, FiltrosInsumo, GradeCadastrada, Insumo, Opcao, Produto};
pub use pessoa::{
    Contato, Endereco, FiltrosPessoa, Pessoa, TipoCadastro, TipoContato, TipoEndereco, TipoPessoa,
    Unicidade,
};
pub use usuario::{
    AtualizarUsuario, Credenciais, CriarUsuario, FiltrosUsuario, FotoPerfil, Login, Role, Token, Usuario,
};
