pub mod auth;
pub mod client;
pub mod entradas;
pub mod estoque;
pub mod formulas;
pub mod insumos;
pub mod pessoas;
pub mod resource;
pub mod session;
pub mod usuarios;

pub use auth::AuthService;
pub use client::{ApiClient, Base};
pub use entradas::{EntradaInsumosService, LoteEntradaService};
pub use estoque::EstoqueService;
pub use formulas::FormulaFabricacaoService;
pub use insumos::InsumoService;
pub use pessoas::PessoaService;
pub use resource::CrudResource;
pub use session::Session;
pub use usuarios::UsuarioService;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn pessoas(&self) -> PessoaService<'_> {
        PessoaService::new(self)
    }

    pub fn insumos(&self) -> InsumoService<'_> {
        InsumoService::new(self)
    }

    pub fn estoque(&self) -> EstoqueService<'_> {
        EstoqueService::new(self)
    }

    pub fn entradas(&self) -> EntradaInsumosService<'_> {
        EntradaInsumosService::new(self)
    }

    pub fn lotes_entrada(&self) -> LoteEntradaService<'_> {
        LoteEntradaService::new(self)
    }

    pub fn formulas(&self) -> FormulaFabricacaoService<'_> {
        FormulaFabricacaoService::new(self)
    }

    pub fn usuarios(&self) -> UsuarioService<'_> {
        UsuarioService::new(self)
    }
}
