mod http_person_repository;
mod traits;

pub use http_person_repository::HttpPersonRepository;
pub use traits::PersonRepository;
