//! AWS Signature Version 4 for DynamoDB requests.
//!
//! Every request is a POST to `/` with a JSON payload and an `X-Amz-Target`
//! header, which keeps the canonical request simple: fixed method, fixed path,
//! no query string, four signed headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "dynamodb";
const SIGNED_HEADERS: &str = "content-type;host;x-amz-date;x-amz-target";

pub struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
    pub host: &'a str,
    pub target: &'a str,
    pub payload: &'a str,
    pub timestamp: DateTime<Utc>,
}

pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

pub fn sign(params: &SigningParams) -> SignedHeaders {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = params.timestamp.format("%Y%m%d").to_string();

    let canonical_headers = format!(
        "content-type:application/x-amz-json-1.0\nhost:{}\nx-amz-date:{}\nx-amz-target:{}\n",
        params.host, amz_date, params.target
    );
    let payload_hash = hex(&Sha256::digest(params.payload.as_bytes()));
    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{payload_hash}"
    );

    let credential_scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", params.region);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{credential_scope}\n{}",
        hex(&Sha256::digest(canonical_request.as_bytes()))
    );

    let signing_key = derive_key(params.secret_access_key, &date_stamp, params.region);
    let signature = hex(&hmac(&signing_key, string_to_sign.as_bytes()));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        params.access_key_id
    );

    SignedHeaders { amz_date, authorization }
}

fn derive_key(secret: &str, date_stamp: &str, region: &str) -> Vec<u8> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac(&k_date, region.as_bytes());
    let k_service = hmac(&k_region, SERVICE.as_bytes());
    hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(payload: &str) -> SigningParams<'_> {
        SigningParams {
            access_key_id: "AKIDEXAMPLE",
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            region: "us-west-2",
            host: "dynamodb.us-west-2.amazonaws.com",
            target: "DynamoDB_20120810.Scan",
            payload,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn signature_is_deterministic() {
        let payload = r#"{"TableName":"pet-hospital-pets"}"#;
        let first = sign(&params(payload));
        let second = sign(&params(payload));

        assert_eq!(first.amz_date, "20260829T120000Z");
        assert_eq!(first.authorization, second.authorization);
    }

    #[test]
    fn authorization_carries_credential_scope() {
        let signed = sign(&params("{}"));

        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20260829/us-west-2/dynamodb/aws4_request"
        ));
        assert!(signed.authorization.contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target"));
        assert!(signed.authorization.contains("Signature="));
    }

    #[test]
    fn signature_depends_on_payload() {
        let a = sign(&params(r#"{"TableName":"a"}"#));
        let b = sign(&params(r#"{"TableName":"b"}"#));
        assert_ne!(a.authorization, b.authorization);
    }

    #[test]
    fn hex_encodes_lowercase() {
        assert_eq!(hex(&[0x00, 0xff, 0x0a]), "00ff0a");
    }
}
