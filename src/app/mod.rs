pub mod advisor;

pub use advisor::LifestyleAdvisor;
