// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fractalplot::cli;
use fractalplot::PlotConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli::mandelbrot_app().get_matches();
    let config = match cli::config_from_matches(&matches, PlotConfig::mandelbrot()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = fractalplot::plot(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("Plot saved as {}", config.output.display());
}
