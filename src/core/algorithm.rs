//! Key generation algorithm selection.

use serde::Serialize;

/// Supported signing key algorithms.
#[derive(clap::ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// ECDSA on NIST P-256 (ES256)
    #[default]
    #[value(name = "ec-p256")]
    #[serde(rename = "ec-p256")]
    EcP256,
    /// RSA with a 2048-bit modulus (RS256)
    #[value(name = "rsa-2048")]
    #[serde(rename = "rsa-2048")]
    Rsa2048,
}

impl Algorithm {
    /// Stable name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::EcP256 => "ec-p256",
            Algorithm::Rsa2048 => "rsa-2048",
        }
    }

    /// JWT algorithm identifier the key pair is meant for.
    pub fn jwt_alg(&self) -> &'static str {
        match self {
            Algorithm::EcP256 => "ES256",
            Algorithm::Rsa2048 => "RS256",
        }
    }

    /// `openssl genpkey` arguments selecting this algorithm.
    pub fn genpkey_args(&self) -> &'static [&'static str] {
        match self {
            Algorithm::EcP256 => &[
                "-algorithm",
                "EC",
                "-pkeyopt",
                "ec_paramgen_curve:P-256",
                "-pkeyopt",
                "ec_param_enc:named_curve",
            ],
            Algorithm::Rsa2048 => &["-algorithm", "RSA", "-pkeyopt", "rsa_keygen_bits:2048"],
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
