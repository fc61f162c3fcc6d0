use std::env::var;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub base_api: String,
    pub key_id: String,
    pub secret: String,
    pub out_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_api: var("APCA_API_BASE_URL").expect("APCA_API_BASE_URL not set"),
            key_id: var("APCA_API_KEY_ID").expect("APCA_API_KEY_ID not set"),
            secret: var("APCA_API_SECRET_KEY").expect("APCA_API_SECRET_KEY not set"),
            out_dir: var("TICKERPLOT_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
