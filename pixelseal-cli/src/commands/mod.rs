pub mod keygen;
pub mod protect;
pub mod verify;
