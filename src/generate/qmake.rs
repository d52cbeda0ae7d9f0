//! qmake project file (`.pro`).

use super::Emitter;
use crate::config::{QmakeConfig, QmakeScope};
use crate::error::GenError;
use crate::project::ResolvedProject;
use std::fmt::Write as _;

pub struct QmakeEmitter {
    config: QmakeConfig,
}

impl QmakeEmitter {
    pub fn new(config: QmakeConfig) -> Self {
        Self { config }
    }

    fn write_header(&self, out: &mut String, project: &ResolvedProject) {
        if !self.config.qt.is_empty() {
            let _ = writeln!(out, "QT += {}", self.config.qt.join(" "));
        }
        for c in &self.config.config {
            let _ = writeln!(out, "CONFIG += {}", c);
        }
        let _ = writeln!(out, "TARGET = {}", project.product_name);
        let _ = writeln!(out, "TEMPLATE = {}", self.config.template);
        let _ = writeln!(out, "RESOURCES += {}.qrc", project.name);
    }

    fn write_defines(&self, out: &mut String, project: &ResolvedProject) {
        for d in &project.defines.all {
            let _ = writeln!(out, "DEFINES += {}", d);
        }
        if project.defines.debug.is_empty() && project.defines.release.is_empty() {
            return;
        }
        out.push_str("CONFIG(debug, debug|release) {\n");
        for d in &project.defines.debug {
            let _ = writeln!(out, "    DEFINES += {}", d);
        }
        out.push_str("}\nelse {\n");
        for d in &project.defines.release {
            let _ = writeln!(out, "    DEFINES += {}", d);
        }
        out.push_str("}\n");
    }

    fn write_files(&self, out: &mut String, project: &ResolvedProject) {
        for module in &project.modules {
            for f in &module.sources {
                let _ = writeln!(out, "SOURCES += {}", quote(&f.relative));
            }
            for f in &module.headers {
                let _ = writeln!(out, "HEADERS += {}", quote(&f.relative));
            }
            for f in &module.forms {
                let _ = writeln!(out, "FORMS += {}", quote(&f.relative));
            }
        }
        for dir in &project.include_dirs {
            let _ = writeln!(out, "INCLUDEPATH += {}", quote(dir));
        }
    }

    fn write_scope(&self, out: &mut String, scope: &QmakeScope) {
        let _ = writeln!(out, "{} {{", scope.condition);
        for dir in &scope.include_dirs {
            let _ = writeln!(out, "    INCLUDEPATH += {}", quote(dir));
        }
        for d in &scope.defines {
            let _ = writeln!(out, "    DEFINES += {}", d);
        }
        for dir in &scope.lib_dirs {
            let _ = writeln!(out, "    QMAKE_LIBDIR += {}", quote(dir));
        }
        if !scope.libs.is_empty() {
            let _ = writeln!(out, "    LIBS += {}", scope.libs.join(" "));
        }
        for flag in &scope.cxxflags {
            let _ = writeln!(out, "    QMAKE_CXXFLAGS += {}", flag);
        }
        if let Some(rc) = &scope.rc_file {
            let _ = writeln!(out, "    RC_FILE = {}", rc);
        }
        out.push_str("}\n");
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

impl Emitter for QmakeEmitter {
    fn file_name(&self, project: &ResolvedProject) -> String {
        format!("{}.pro", project.name)
    }

    fn render(&self, project: &ResolvedProject) -> Result<String, GenError> {
        let mut out = String::new();
        self.write_header(&mut out, project);
        self.write_defines(&mut out, project);
        self.write_files(&mut out, project);
        for scope in &self.config.scopes {
            self.write_scope(&mut out, scope);
        }
        Ok(out)
    }
}
