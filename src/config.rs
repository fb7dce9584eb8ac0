use crate::service::room_resolver::MIN_ROOMS_TO_SHOW;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub room_images_bucket: String,
    pub min_rooms_to_show: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let supabase_url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let supabase_anon_key =
            std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
        let jwt_secret =
            std::env::var("SUPABASE_JWT_SECRET").expect("SUPABASE_JWT_SECRET must be set");

        // Cookie lifetime in hours
        let jwt_maxage = std::env::var("JWT_MAXAGE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(1);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        let room_images_bucket = std::env::var("ROOM_IMAGES_BUCKET")
            .unwrap_or_else(|_| "room_images".to_string());

        let min_rooms_to_show = std::env::var("MIN_ROOMS_TO_SHOW")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MIN_ROOMS_TO_SHOW);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:8080".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Config {
            database_url,
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            jwt_secret,
            jwt_maxage,
            port,
            room_images_bucket,
            min_rooms_to_show,
            allowed_origins,
        }
    }
}
