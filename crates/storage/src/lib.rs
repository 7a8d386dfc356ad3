#![forbid(unsafe_code)]

pub mod mock;
pub mod repository;

pub use repository::{
    ActivityRepository, InMemoryRepository, ScheduleRepository, Storage, StorageError,
    SubjectRepository,
};
