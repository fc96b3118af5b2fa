pub mod crud_controller;
pub mod usuario_controller;
