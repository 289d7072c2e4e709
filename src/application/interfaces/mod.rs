pub mod clock;
pub mod credential_hasher;
