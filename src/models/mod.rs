mod animal;
mod financeiro;
mod reproducao;
mod saude;
mod usuario;

pub use animal::{Animal, AnimalRef};
pub use financeiro::{RegistroFinanceiro, RegistroFinanceiroDetalhado, ResumoFinanceiro};
pub use reproducao::{
    Bezerros, RegistroReproducao, RegistroReproducaoDetalhado, ResumoReproducao,
};
pub use saude::{RegistroSaude, RegistroSaudeDetalhado};
pub use usuario::Usuario;
