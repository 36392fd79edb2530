use std::sync::Arc;

use telematics::RiskModel;

#[derive(Clone)]
pub struct AppState {
    model: Option<Arc<dyn RiskModel>>,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn RiskModel>>) -> Self {
        Self { model }
    }

    /// `None` when the artifact failed to load at startup.
    pub fn model(&self) -> Option<&Arc<dyn RiskModel>> {
        self.model.as_ref()
    }
}
