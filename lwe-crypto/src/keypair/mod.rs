pub mod keys;
pub mod params;

pub use keys::{PrivateKey, PublicKey};
pub use params::LweParams;
