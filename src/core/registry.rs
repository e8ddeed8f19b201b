//! # Service Registry
//!
//! 프로세스 전역의 타입 기반 서비스 레지스트리입니다.
//! `main`에서 인프라(MongoDB, Redis, SMTP, Nominatim), 리포지토리, 서비스를
//! 순서대로 생성하여 [`ServiceLocator::set`]으로 등록하고, 핸들러와 미들웨어는
//! 각 서비스의 `instance()`로 꺼내 씁니다.
//!
//! ```text
//! main
//!  ├─ Database / RedisClient / SmtpMailer / NominatimClient   (인프라)
//!  ├─ Mongo*Repository                                          (리포지토리)
//!  ├─ TokenService / AuthService / OtpService / CleanupEventService
//!  └─ HttpServer ── handlers ── XxxService::instance()
//! ```
//!
//! 서비스는 생성자에서 의존성을 `Arc`로 직접 받기 때문에, 테스트에서는
//! 레지스트리를 거치지 않고 가짜 구현을 주입해 생성할 수 있습니다.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::core::errors::{AppError, AppResult};

/// 레지스트리에 등록되는 서비스의 공통 인터페이스
///
/// 인덱스 생성처럼 기동 시 한 번 수행해야 하는 작업은 `init`에 둡니다.
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

/// 컬렉션 하나 이상을 소유하는 리포지토리의 공통 인터페이스
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 초기화 작업
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

/// 타입 ID로 `Arc<T>` 인스턴스를 보관하는 로케이터
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
});

impl ServiceLocator {
    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = Self::clean_type_name(std::any::type_name::<T>());
        log::debug!("📦 Registering: {}", type_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스를 찾습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 등록된 인스턴스를 찾고, 없으면 에러를 반환합니다.
    pub fn resolve<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        Self::try_get::<T>().ok_or_else(|| {
            AppError::InternalError(format!(
                "{} is not registered",
                Self::clean_type_name(std::any::type_name::<T>())
            ))
        })
    }

    /// 등록된 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// 기동 시 등록되지 않은 타입을 요청하면 패닉이 발생합니다.
    /// 등록은 서버가 요청을 받기 전에 끝나므로 요청 처리 중에는 발생하지 않습니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Some(instance) => instance,
            None => panic!(
                "Service not found: {}. Register it with ServiceLocator::set() before starting the server",
                std::any::type_name::<T>()
            ),
        }
    }

    /// 리포지토리와 서비스의 `init`을 순서대로 실행합니다.
    pub async fn initialize_all(
        repositories: &[Arc<dyn Repository>],
        services: &[Arc<dyn Service>],
    ) -> AppResult<()> {
        log::info!("🔄 Initializing {} repositories", repositories.len());
        for repository in repositories {
            repository.init().await?;
            log::info!("  ✓ {} ({})", repository.name(), repository.collection_name());
        }

        log::info!("🔄 Initializing {} services", services.len());
        for service in services {
            service.init().await?;
            log::info!("  ✓ {}", service.name());
        }

        Ok(())
    }

    fn clean_type_name(type_name: &str) -> &str {
        match type_name.rfind("::") {
            Some(pos) => &type_name[pos + 2..],
            None => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        value: u32,
    }

    struct Unregistered;

    #[test]
    fn test_set_and_get_roundtrip() {
        ServiceLocator::set(Arc::new(Probe { value: 7 }));

        let probe = ServiceLocator::get::<Probe>();
        assert_eq!(probe.value, 7);
    }

    #[test]
    fn test_resolve_unregistered_type_fails() {
        let result = ServiceLocator::resolve::<Unregistered>();
        assert!(matches!(result, Err(AppError::InternalError(msg)) if msg.contains("Unregistered")));
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(ServiceLocator::clean_type_name("a::b::CleanupEventService"), "CleanupEventService");
        assert_eq!(ServiceLocator::clean_type_name("Plain"), "Plain");
    }
}
