use std::sync::Arc;

use log::info;

use crate::budgets::{BudgetRepository, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait};
use crate::db;
use crate::errors::Result;
use crate::expenses::{
    ExpenseRepository, ExpenseRepositoryTrait, ExpenseService, ExpenseServiceTrait,
};
use crate::ratios::{RatioRepository, RatioRepositoryTrait, RatioService, RatioServiceTrait};
use crate::recommendation::{
    RecommendationRepository, RecommendationRepositoryTrait, RecommendationService,
    RecommendationServiceTrait,
};
use crate::statistics::{StatisticsService, StatisticsServiceTrait};
use crate::users::{UserRepository, UserRepositoryTrait, UserService, UserServiceTrait};

/// Central container for the engine's services, wired over one shared pool
/// and one writer actor.
pub struct ServiceContext {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub ratio_service: Arc<dyn RatioServiceTrait>,
    pub recommendation_service: Arc<dyn RecommendationServiceTrait>,
    pub statistics_service: Arc<dyn StatisticsServiceTrait>,
}

/// Opens (or creates) the database under `app_data_dir`, applies pending
/// migrations and wires every repository and service together.
pub async fn initialize_context(app_data_dir: &str) -> Result<ServiceContext> {
    let db_path = db::init(app_data_dir)?;
    info!("Database initialized at {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let user_repository: Arc<dyn UserRepositoryTrait> =
        Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let budget_repository: Arc<dyn BudgetRepositoryTrait> =
        Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let ratio_repository: Arc<dyn RatioRepositoryTrait> =
        Arc::new(RatioRepository::new(pool.clone(), writer.clone()));
    let expense_repository: Arc<dyn ExpenseRepositoryTrait> =
        Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let recommendation_repository: Arc<dyn RecommendationRepositoryTrait> =
        Arc::new(RecommendationRepository::new(writer));

    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));
    let ratio_service: Arc<dyn RatioServiceTrait> =
        Arc::new(RatioService::new(ratio_repository.clone()));
    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        budget_repository.clone(),
        user_repository.clone(),
        ratio_service.clone(),
    ));
    let expense_service: Arc<dyn ExpenseServiceTrait> = Arc::new(ExpenseService::new(
        expense_repository.clone(),
        budget_repository.clone(),
        user_repository.clone(),
    ));
    let recommendation_service: Arc<dyn RecommendationServiceTrait> = Arc::new(
        RecommendationService::new(recommendation_repository, user_repository.clone()),
    );
    let statistics_service: Arc<dyn StatisticsServiceTrait> = Arc::new(StatisticsService::new(
        expense_repository.clone(),
        user_repository.clone(),
    ));

    Ok(ServiceContext {
        user_service,
        budget_service,
        expense_service,
        ratio_service,
        recommendation_service,
        statistics_service,
    })
}
