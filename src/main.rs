// Load a json file that specifies the plot we are going to make, render it
// and write the result out as a png.
//
// Example input:
//   { "expression": "sin(z)", "width": 800, "height": 600, "scale": 80 }

use std::env;
use std::fs::File;
use std::io::{Error, ErrorKind, Read};

use log::info;

use rplot::{render_frame, PlotSpec};

fn main() -> std::io::Result<()> {
    env_logger::init();
    // Get files to use else defaults
    let in_filename = env::args().nth(1).unwrap_or("input.json".to_string());
    let out_filename = env::args().nth(2).unwrap_or("output.png".to_string());
    info!("loading input file: {}", in_filename);
    let mut file = File::open(in_filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let input = json::parse(&contents).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't parse input")
    )?;
    let spec = PlotSpec::from_json(&input).map_err(
        |err| Error::new(ErrorKind::InvalidData, err.to_string())
    )?;
    info!(
        "rendering {} at {}x{}",
        spec.expression(),
        spec.width(),
        spec.height()
    );
    let result = render_frame(&spec).map_err(
        |err| Error::new(ErrorKind::InvalidData, err.to_string())
    )?;
    info!("writing output to {}", out_filename);
    result.image.save(out_filename).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't write image")
    )?;
    Ok(())
}
