#[cfg(not(debug_assertions))]
pub fn init_logging() {
    use syslog::BasicLogger;

    log
        ::set_boxed_logger(
            Box::new(
                BasicLogger::new(
                    syslog::unix(
                        // only 3164 has log crate integration
                        syslog::Formatter3164 {
                            process: clap::crate_name!().into(),
                            pid: std::process::id(),
                            ..Default::default()
                        },
                    ).unwrap_or_else(|e| {
                        eprintln!("syslog initialization failed: {e}");
                        std::process::exit(1)
                    })
                )
            )
        )
        .map(|()| log::set_max_level(log::LevelFilter::Info))
        .unwrap_or_else(|e| {
            eprintln!("logger initialization failed: {e}");
            std::process::exit(1)
        });
}

#[cfg(debug_assertions)]
pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init()
}
