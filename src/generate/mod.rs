mod pipeline;
mod qmake;
mod qrc;

use crate::error::GenError;
use crate::project::ResolvedProject;

pub use pipeline::{
    Assembly, Generated, OutputLayout, apply_layout, assemble, build_project, render_all,
};
pub use qmake::QmakeEmitter;
pub use qrc::{QrcEmitter, ResourceEntry, ResourceManifest};

/// Renders a resolved project into one build-tool file.
pub trait Emitter {
    /// Name of the generated file inside the output directory.
    fn file_name(&self, project: &ResolvedProject) -> String;

    fn render(&self, project: &ResolvedProject) -> Result<String, GenError>;
}
