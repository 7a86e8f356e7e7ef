use utoipa::IntoParams;

#[derive(serde_derive::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default = "GetKittensRequest::default")]
pub struct GetKittensRequest {
    /// Gallery page to start from. Page 0 is read as page 1.
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for GetKittensRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

#[inline(always)]
fn default_page() -> u32 {
    1
}
