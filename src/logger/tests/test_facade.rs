use crate::logger;

/// The facade is a no-op before initialization and tolerates repeated
/// init calls (first one wins). Tests share one process, so this is the
/// only test that touches the global.
#[test]
fn test_global_facade_init_and_log() {
    logger::log(logger::LogLevel::Info, "before init is a no-op");

    logger::init_logger(logger::NoopLogger);
    logger::init_logger(logger::NoopLogger);

    logger::debug("debug");
    logger::info("info");
    logger::warn("warn");
    logger::error("error");
}
