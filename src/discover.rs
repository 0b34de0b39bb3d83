use std::path::PathBuf;

use tracing::debug;

use crate::model::InputFile;
use crate::options::CombineOptions;

pub(crate) fn file_name_for(options: &CombineOptions, index: u32) -> String {
    format!("{}{index}.{}", options.prefix, options.extension)
}

pub(crate) fn describe_pattern(options: &CombineOptions) -> String {
    let indices = options.indices.indices();
    options
        .input_dir
        .join(format!(
            "{}{{{}..{}}}.{}",
            options.prefix, indices.start, indices.end, options.extension
        ))
        .display()
        .to_string()
}

/// Lists the numbered input files that exist, in ascending index order.
pub fn discover_input_files(options: &CombineOptions) -> Vec<InputFile> {
    options
        .indices
        .indices()
        .filter_map(|index| {
            let path: PathBuf = options.input_dir.join(file_name_for(options, index));
            if path.is_file() {
                debug!(index, path = %path.display(), "found input file");
                Some(InputFile { index, path })
            } else {
                None
            }
        })
        .collect()
}
