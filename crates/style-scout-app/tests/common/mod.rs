//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use style_scout_app::CaptureController;
use style_scout_camera::SyntheticCameraBackend;
use style_scout_submit::{AnalysisRequest, SubmitClient, SubmitError, SubmitTransport, TransportReply};

/// Analysis endpoint accepted by the submit client policy.
#[allow(dead_code)]
pub const TEST_ENDPOINT: &str = "https://styles.example.test/api/analyze";

/// Creates a controller backed by the deterministic synthetic camera,
/// returning the backend handle for track accounting assertions.
#[allow(dead_code)]
pub fn synthetic_controller() -> (Arc<SyntheticCameraBackend>, CaptureController) {
    let backend = Arc::new(SyntheticCameraBackend::new());
    let controller = CaptureController::new(backend.clone());
    (backend, controller)
}

/// Transport double that counts calls and replays one canned reply.
#[allow(dead_code)]
pub struct RecordingTransport {
    calls: Mutex<u32>,
    reply: TransportReply,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(0),
            reply: TransportReply {
                status,
                body: body.into(),
            },
        })
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().expect("call counter lock should work")
    }
}

impl SubmitTransport for RecordingTransport {
    fn send(
        &self,
        _endpoint: &str,
        _request: &AnalysisRequest,
    ) -> Result<TransportReply, SubmitError> {
        let mut calls = self.calls.lock().expect("call counter lock should work");
        *calls += 1;
        Ok(self.reply.clone())
    }
}

/// Builds a submit client over the recording transport.
#[allow(dead_code)]
pub fn client_with(transport: Arc<RecordingTransport>) -> SubmitClient {
    SubmitClient::new(TEST_ENDPOINT, transport).expect("test endpoint should pass policy")
}

/// Canonical successful analysis body with two products in a fixed order.
#[allow(dead_code)]
pub fn success_body() -> String {
    r##"{
        "success": true,
        "skin_tone": "Fair",
        "average_color": "rgb(229,194,152)",
        "face_shape": "Oval",
        "recommendations": "# Your Style Guide\n\n**Colors** that flatter you:\n\n- Royal Blue\n- Emerald Green",
        "products": [
            {
                "name": "Royal Blue Shirt",
                "description": "Enhances brightness for Fair skin",
                "shop_link": "https://www.amazon.in/s?k=royal+blue+shirt"
            },
            {
                "name": "Silver Jewelry Set",
                "shop_link": "https://www.amazon.in/s?k=silver+jewelry"
            }
        ]
    }"##
    .to_string()
}
