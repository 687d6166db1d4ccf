pub mod ajuda;
pub mod dashboard;
pub mod nova_escritura;
pub mod revisao;

pub use ajuda::AjudaScreen;
pub use dashboard::DashboardScreen;
pub use nova_escritura::{NovaEscrituraScreen, NovaField};
pub use revisao::{LoadState, RevisaoScreen};
