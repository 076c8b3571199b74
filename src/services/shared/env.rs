use dotenvy::{dotenv, from_filename, var};

pub fn check_for_env_variables() {
    // the first three env variables are necessary for operation, thus the app panics if they
    // aren't present
    match get_env_variable("POSTGRES_URL") {
        Some(_) => println!("Postgres URL set ✅"),
        None => panic!("Please set a valid Postgres connection URL as POSTGRES_URL in your environment variables"),
    };
    match get_env_variable("RATE_FEED_URL") {
        Some(_) => println!("Rate feed URL set ✅"),
        None => panic!("Please set the exchange rate feed endpoint as RATE_FEED_URL in your environment variables"),
    };
    match get_env_variable("DEFAULT_FEE") {
        Some(_) => println!("Default fee set ✅"),
        None => panic!("Please set the fallback conversion fee as DEFAULT_FEE in your environment variables, e.g. 0.01"),
    };
    match get_env_variable("API_TOKEN") {
        Some(_) => println!("API token set ✅"),
        None => println!("No API token set, the admin endpoints will accept unauthenticated requests. ⚠️"),
    };
    match get_env_variable("PORT") {
        Some(_) => println!("Port set ✅"),
        None => println!("No port set, the API will listen on 8080."),
    };
}

pub fn get_env_variable(variable_to_get: &str) -> Option<String> {
    let environment = var("RUST_ENV").unwrap_or_else(|_| "development".into());

    match environment.as_str() {
        "development" => from_filename(".env.dev").ok(),
        "production" => from_filename(".env.prod").ok(),
        _ => dotenv().ok(),
    };
    var(variable_to_get).ok()
}
