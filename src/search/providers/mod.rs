mod mock;

pub use mock::MockPeopleProvider;
