/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Paillier's cryptosystem (1999) as used by multi-party signing protocols.
//! Public-Key Cryptosystems based on composite degree residuosity class.
//! See <http://citeseerx.ist.psu.edu/download?doi=10.1.1.4035&rep=rep1&type=pdf>
//!
//! Keys are generated with `p = 3 mod 8` and `q = 7 mod 8` so that the
//! modulus can be used with the Paillier-Blum modulus proof. Ciphertexts
//! support addition, subtraction and scalar multiplication through
//! [`PublicKey`] without the private key.
//!
//! ```no_run
//! use mpc_paillier::*;
//!
//! let (pk, sk) = generate_key_pair(2048).unwrap();
//! let c1 = pk.encrypt_u64(42).unwrap();
//! let c2 = pk.encrypt_u64(58).unwrap();
//! let sum = pk.add(&c1, &c2).unwrap();
//! assert_eq!(sk.decrypt_u64(&sum).unwrap(), 100);
//! ```
#![deny(
    warnings,
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    trivial_casts,
    trivial_numeric_casts
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ciphertext;
mod codec;
mod error;
mod homomorphic;
mod keygen;
mod privatekey;
mod publickey;
mod utils;

pub use unknown_order;

use unknown_order::BigNumber;

/// Smallest modulus accepted anywhere in this crate, only suitable for testing
pub const MIN_KEY_BITS: usize = 256;
/// Smallest modulus that should be used in production
pub const RECOMMENDED_KEY_BITS: usize = 2048;

/// A Paillier Ciphertext
pub type Ciphertext = BigNumber;
/// A Paillier nonce used during encryption
pub type Nonce = BigNumber;

pub use ciphertext::*;
pub use codec::*;
pub use error::*;
pub use keygen::*;
pub use privatekey::*;
pub use publickey::*;
