mod mock_person_repository;

pub use mock_person_repository::MockPersonRepository;
