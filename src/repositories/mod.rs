//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 하위 모듈은 서비스가 의존하는 저장소 trait(`*Store`)과 그 MongoDB 구현
//! (`*Repository`)을 함께 제공합니다. 서비스는 trait 객체만 알기 때문에
//! 테스트에서는 메모리 구현으로 바꿔 끼울 수 있습니다.
//!
//! | Trait | 구현 | 컬렉션 |
//! |-------|------|--------|
//! | [`users::UserStore`] | [`users::UserRepository`] | `users` |
//! | [`tokens::BlacklistStore`] | [`tokens::BlacklistTokenRepository`] | `blacklist_tokens` |
//! | [`otp::OtpStore`] | [`otp::OtpRepository`] | `otps` |
//! | [`geo::SettlementStore`] | [`geo::SettlementRepository`] | `settlements`, `regions` |
//! | [`cleanup_events::CleanupEventStore`] | [`cleanup_events::CleanupEventRepository`] | `cleanup_events` 외 3개 |
//! | [`cleanup_events::TakePartStore`] | [`cleanup_events::TakePartRepository`] | `take_parts` |
//!
//! 인덱스는 [`crate::core::registry::Repository::init`]에서 기동 시 생성합니다.

pub mod users;
pub mod tokens;
pub mod otp;
pub mod geo;
pub mod cleanup_events;
