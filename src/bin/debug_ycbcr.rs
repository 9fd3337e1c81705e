//! Print the fixed-point YCbCr values of the reference colors
//!
//! Flags any component that does not fit a signed 8-bit sample.

use colorcheck::check_reference_transform;
use colorcheck::report::render_transform_checks;

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let checks = check_reference_transform();
    print!("{}", render_transform_checks(&checks));
}
