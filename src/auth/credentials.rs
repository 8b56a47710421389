use sha2::{Digest, Sha256};

/// Digest da senha calculado no servidor, antes do encaminhamento ao webhook
/// de login/registro. A senha em claro nunca sai deste processo.
pub fn credential_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_e_hex_de_64_caracteres() {
        let digest = credential_digest("s3nh4-forte");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_e_deterministico() {
        assert_eq!(credential_digest("abc"), credential_digest("abc"));
        assert_ne!(credential_digest("abc"), credential_digest("abd"));
    }
}
