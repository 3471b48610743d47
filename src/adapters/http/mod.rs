//! HTTP adapter for the diagnosis backend (reqwest, blocking).

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{CatalogSymptom, Diagnosis, DiagnosisRequest, VerdictRequest};
use crate::ports::{ApiError, DiagnosisApi, DIAGNOSIS_PATH, SAVE_PATH, SYMPTOMS_PATH};

/// Error body shape the backend uses for failed requests.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Diagnosis API client talking JSON over HTTP.
pub struct HttpDiagnosisApi {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpDiagnosisApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: &reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Http(e.to_string())
        }
    }

    /// Check the status and return the body text of a successful response.
    fn read_body(
        &self,
        path: &str,
        response: reqwest::blocking::Response,
    ) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(&e))?;

        tracing::info!(endpoint = path, status = status.as_u16(), "Diagnosis API response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::warn!(endpoint = path, status = status.as_u16(), "Diagnosis API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!(endpoint = path, error = %e, "Diagnosis API body did not match schema");
            ApiError::Decode(e.to_string())
        })
    }
}

impl DiagnosisApi for HttpDiagnosisApi {
    fn fetch_symptoms(&self) -> Result<Vec<CatalogSymptom>, ApiError> {
        let response = self
            .client
            .get(self.url(SYMPTOMS_PATH))
            .send()
            .map_err(|e| self.transport_error(&e))?;

        let body = self.read_body(SYMPTOMS_PATH, response)?;
        Self::decode(SYMPTOMS_PATH, &body)
    }

    fn request_diagnosis(&self, request: &DiagnosisRequest) -> Result<Diagnosis, ApiError> {
        tracing::debug!(symptoms = request.symptoms.len(), "Posting diagnosis request");

        let response = self
            .client
            .post(self.url(DIAGNOSIS_PATH))
            .json(request)
            .send()
            .map_err(|e| self.transport_error(&e))?;

        let body = self.read_body(DIAGNOSIS_PATH, response)?;
        Diagnosis::from_json(&body).map_err(|e| {
            tracing::warn!(endpoint = DIAGNOSIS_PATH, error = %e, "Diagnosis API body did not match schema");
            ApiError::Decode(e.to_string())
        })
    }

    fn save_verdict(&self, verdict: &VerdictRequest) -> Result<(), ApiError> {
        tracing::debug!(is_valid = verdict.is_valid, "Posting diagnosis verdict");

        let response = self
            .client
            .post(self.url(SAVE_PATH))
            .json(verdict)
            .send()
            .map_err(|e| self.transport_error(&e))?;

        self.read_body(SAVE_PATH, response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, SymptomPayload};
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    const FLU: &str = r#"[{"issue":{"id":"d1","name":"Flu","accuracy":"80","icd":"J10","profName":"Influenza"},"specialisation":[{"id":"sp1","name":"GP","specId":"g1","specialistName":"Dr. A"}]}]"#;

    struct Captured {
        request_line: String,
        body: String,
    }

    /// Serve a single canned HTTP response and report the request received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }

            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).expect("request body");

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");

            let _ = tx.send(Captured {
                request_line: request_line.trim_end().to_string(),
                body: String::from_utf8_lossy(&request_body).into_owned(),
            });
        });

        (format!("http://{addr}"), rx)
    }

    fn sample_request() -> DiagnosisRequest {
        DiagnosisRequest {
            patient_name: "John Doe".into(),
            gender: Gender::Male,
            year_of_birth: "1990".into(),
            symptoms: vec![SymptomPayload {
                id: "s1".into(),
                description: "Fever".into(),
            }],
        }
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let api = HttpDiagnosisApi::new("http://localhost:8080/", 5).expect("client");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url(SYMPTOMS_PATH), "http://localhost:8080/api/v1/symptoms");
    }

    #[test]
    fn fetch_symptoms_reads_catalog() {
        let (url, rx) = serve_once("200 OK", r#"[{"id":"s1","name":"Fever"},{"id":15,"name":"Cough"}]"#);
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        let symptoms = api.fetch_symptoms().expect("catalog");
        assert_eq!(
            symptoms,
            vec![CatalogSymptom::new("s1", "Fever"), CatalogSymptom::new("15", "Cough")]
        );

        let captured = rx.recv().expect("captured request");
        assert_eq!(captured.request_line, "GET /api/v1/symptoms HTTP/1.1");
    }

    #[test]
    fn fetch_symptoms_surfaces_server_error() {
        let (url, _rx) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        assert_eq!(
            api.fetch_symptoms(),
            Err(ApiError::Status {
                status: 500,
                message: None
            })
        );
    }

    #[test]
    fn request_diagnosis_posts_payload() {
        let (url, rx) = serve_once("200 OK", FLU);
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        let diagnosis = api.request_diagnosis(&sample_request()).expect("diagnosis");
        assert_eq!(diagnosis.results()[0].issue.name, "Flu");

        let captured = rx.recv().expect("captured request");
        assert_eq!(captured.request_line, "POST /api/v1/diagnosis HTTP/1.1");
        let sent: serde_json::Value = serde_json::from_str(&captured.body).expect("json body");
        assert_eq!(
            sent,
            json!({
                "patientName": "John Doe",
                "gender": "male",
                "yearOfBirth": "1990",
                "symptoms": [{"id": "s1", "description": "Fever"}]
            })
        );
    }

    #[test]
    fn request_diagnosis_reports_server_message() {
        let (url, _rx) = serve_once("400 Bad Request", r#"{"message":"Unknown symptom id"}"#);
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        let err = api.request_diagnosis(&sample_request()).expect_err("should fail");
        assert_eq!(err.server_message(), Some("Unknown symptom id"));
    }

    #[test]
    fn request_diagnosis_rejects_unexpected_shape() {
        let (url, _rx) = serve_once("200 OK", r#"{"unexpected":true}"#);
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        let err = api.request_diagnosis(&sample_request()).expect_err("should fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn save_verdict_accepts_created() {
        let (url, rx) = serve_once("201 Created", "{}");
        let api = HttpDiagnosisApi::new(&url, 5).expect("client");

        let verdict = VerdictRequest {
            patient_name: "John Doe".into(),
            gender: Gender::Male,
            year_of_birth: "1990".into(),
            symptoms: sample_request().symptoms,
            diagnosis: FLU.into(),
            is_valid: true,
        };
        api.save_verdict(&verdict).expect("saved");

        let captured = rx.recv().expect("captured request");
        assert_eq!(captured.request_line, "POST /api/v1/save HTTP/1.1");
        let sent: serde_json::Value = serde_json::from_str(&captured.body).expect("json body");
        assert_eq!(sent["isValid"], json!(true));
        assert_eq!(sent["diagnosis"], json!(FLU));
    }

    #[test]
    fn unreachable_backend_is_a_connection_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let api = HttpDiagnosisApi::new(&format!("http://127.0.0.1:{port}"), 5).expect("client");

        assert!(matches!(api.fetch_symptoms(), Err(ApiError::Connection(_))));
    }
}
