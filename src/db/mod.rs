pub mod animais;
pub mod financeiro;
pub mod reproducao;
pub mod saude;
pub mod usuarios;
