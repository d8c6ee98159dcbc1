/// Use cases module containing application business logic orchestration
mod collect_status;

pub use collect_status::CollectStatusUseCase;
