use crate::{
    api::{employee, timesheet},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee)),
                    ),
            )
            .service(
                web::scope("/timesheets")
                    // /timesheets — POST is the combined create/update handler
                    .service(
                        web::resource("")
                            .route(web::get().to(timesheet::list_timesheets))
                            .route(web::post().to(timesheet::save_timesheet)),
                    )
                    // /timesheets/{id}
                    .service(web::resource("/{id}").route(web::get().to(timesheet::get_timesheet))),
            ),
    );
}
