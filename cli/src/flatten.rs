use crate::commands::FlattenCmd;
use quill::extra::parser::parse_path_data;
use quill::path::Path;
use std::io;

pub fn flatten(mut cmd: FlattenCmd) -> Result<(), io::Error> {
    let mut path = Path::with_tolerance(1.0 / cmd.tessellation_factor);
    let errors = parse_path_data(&cmd.input, &mut path);
    if !errors.is_empty() {
        log::warn!("{} parse error(s), the affected commands were skipped", errors.len());
    }

    if cmd.count {
        let num_vertices: usize = path.sub_paths().iter().map(|sub_path| sub_path.len()).sum();

        writeln!(&mut *cmd.output, "vertices: {}", num_vertices)?;
        writeln!(&mut *cmd.output, "paths: {}", path.sub_paths().len())?;

        return Ok(());
    }

    for sub_path in path.sub_paths() {
        for (i, p) in sub_path.positions().enumerate() {
            let cmd_name = if i == 0 { "M" } else { "L" };
            write!(&mut *cmd.output, "{} {} {} ", cmd_name, p.x, p.y)?;
        }
        if sub_path.is_closed() {
            write!(&mut *cmd.output, "Z")?;
        }
        writeln!(&mut *cmd.output)?;
    }

    Ok(())
}
