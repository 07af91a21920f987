//! Crypto/encoding built-ins (§6.5), grounded in the distilled reference's
//! `stdlib/crypto_tools.py`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use md5::Md5;
use rand::RngCore;
use sha2::{Digest, Sha256};

use super::{def, optional_number, string};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "hash_sha256", |args| {
        let text = string(args, 0, "hash_sha256")?;
        let digest = Sha256::digest(text.as_bytes());
        Ok(Value::String(hex(&digest)))
    });

    def(env, "hash_md5", |args| {
        let text = string(args, 0, "hash_md5")?;
        let digest = Md5::digest(text.as_bytes());
        Ok(Value::String(hex(&digest)))
    });

    def(env, "generate_token", |args| {
        let length = optional_number(args, 0, 32.0).max(0.0) as usize;
        let mut bytes = vec![0u8; length / 2];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(Value::String(hex(&bytes)))
    });

    def(env, "encode_base64", |args| {
        let text = string(args, 0, "encode_base64")?;
        Ok(Value::String(BASE64.encode(text.as_bytes())))
    });

    def(env, "decode_base64", |args| {
        let text = string(args, 0, "decode_base64")?;
        let bytes = BASE64.decode(&text).map_err(|e| KaynatError::value_error(format!("invalid base64: {e}")))?;
        String::from_utf8(bytes)
            .map(Value::String)
            .map_err(|e| KaynatError::value_error(format!("invalid base64: {e}")))
    });
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
