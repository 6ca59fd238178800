use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    auth::AuthRepositoryImpl, facility::FacilityRepositoryImpl, health::HealthCheckRepositoryImpl,
    reservation::ReservationRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, facility::FacilityRepository, health::HealthCheckRepository,
    reservation::ReservationRepository, user::UserRepository,
};
use kernel::service::{availability::AvailabilityChecker, booking::ReservationCreator};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    availability_checker: Arc<AvailabilityChecker>,
    reservation_creator: Arc<ReservationCreator>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let facility_repository: Arc<dyn FacilityRepository> =
            Arc::new(FacilityRepositoryImpl::new(pool.clone()));
        let reservation_repository: Arc<dyn ReservationRepository> =
            Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(pool.clone()));

        let availability_checker = Arc::new(AvailabilityChecker::new(
            facility_repository.clone(),
            reservation_repository.clone(),
        ));
        let reservation_creator = Arc::new(ReservationCreator::new(
            facility_repository.clone(),
            user_repository.clone(),
            reservation_repository.clone(),
        ));

        Self {
            health_check_repository,
            facility_repository,
            reservation_repository,
            user_repository,
            auth_repository,
            availability_checker,
            reservation_creator,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn availability_checker(&self) -> Arc<AvailabilityChecker> {
        self.availability_checker.clone()
    }

    pub fn reservation_creator(&self) -> Arc<ReservationCreator> {
        self.reservation_creator.clone()
    }
}
