//! 클린업 플랫폼 백엔드 메인 애플리케이션
//!
//! 인프라(MongoDB, Redis, SMTP, Nominatim)에 연결하고, 리포지토리와 서비스를 만들어
//! 레지스트리에 등록한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use cleanup_platform_backend::caching::redis::RedisClient;
use cleanup_platform_backend::config::{GeocodingConfig, MailConfig, RateLimitConfig, ServerConfig};
use cleanup_platform_backend::core::registry::{Repository, Service, ServiceLocator};
use cleanup_platform_backend::db::Database;
use cleanup_platform_backend::repositories::cleanup_events::{CleanupEventRepository, TakePartRepository};
use cleanup_platform_backend::repositories::geo::SettlementRepository;
use cleanup_platform_backend::repositories::otp::OtpRepository;
use cleanup_platform_backend::repositories::tokens::BlacklistTokenRepository;
use cleanup_platform_backend::repositories::users::UserRepository;
use cleanup_platform_backend::routes::configure_all_routes;
use cleanup_platform_backend::services::auth::{AuthService, TokenService};
use cleanup_platform_backend::services::cleanup_events::CleanupEventService;
use cleanup_platform_backend::services::geocoding::NominatimClient;
use cleanup_platform_backend::services::mail::SmtpMailer;
use cleanup_platform_backend::services::otp::OtpService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 클린업 플랫폼 백엔드 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await?;

    register_components(database, redis_client).await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

/// 리포지토리와 서비스를 만들어 레지스트리에 등록하고 초기화합니다.
///
/// # Errors
///
/// * SMTP/HTTP 클라이언트 생성 실패, 인덱스 생성 실패
async fn register_components(database: Arc<Database>, redis_client: Arc<RedisClient>) -> io::Result<()> {
    let users = Arc::new(UserRepository::new(database.clone()));
    let blacklist = Arc::new(BlacklistTokenRepository::new(database.clone()));
    let otps = Arc::new(OtpRepository::new(database.clone()));
    let settlements = Arc::new(SettlementRepository::new(database.clone()));
    let events = Arc::new(CleanupEventRepository::new(database.clone()));
    let take_parts = Arc::new(TakePartRepository::new(database));

    let mailer = Arc::new(SmtpMailer::new(&MailConfig::from_env()).map_err(io::Error::other)?);
    let geocoder = Arc::new(NominatimClient::new(GeocodingConfig::from_env()).map_err(io::Error::other)?);

    let token_service = Arc::new(TokenService::from_env());
    let otp_service = Arc::new(OtpService::with_config(otps.clone(), mailer));
    let auth_service = Arc::new(AuthService::with_config(
        users.clone(),
        blacklist.clone(),
        token_service.clone(),
        otp_service.clone(),
    ));
    let cleanup_event_service = Arc::new(CleanupEventService::with_config(
        events.clone(),
        take_parts.clone(),
        settlements.clone(),
        users.clone(),
        geocoder,
        redis_client,
    ));

    ServiceLocator::set(token_service.clone());
    ServiceLocator::set(otp_service.clone());
    ServiceLocator::set(auth_service.clone());
    ServiceLocator::set(cleanup_event_service.clone());

    let repositories: Vec<Arc<dyn Repository>> =
        vec![users, blacklist, otps, settlements, events, take_parts];
    let services: Vec<Arc<dyn Service>> = vec![
        token_service,
        otp_service,
        auth_service,
        cleanup_event_service,
    ];

    ServiceLocator::initialize_all(&repositories, &services)
        .await
        .map_err(|e| {
            error!("서비스 초기화 실패: {}", e);
            io::Error::other(e)
        })
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 표준 출력으로 남깁니다.
    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("Redis 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// CORS 설정
///
/// 리프레시 토큰 쿠키를 주고받기 위해 자격 증명을 허용합니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
