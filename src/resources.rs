use std::ffi;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "I/O error")]
    Io(#[cause] io::Error),
    #[fail(display = "Failed to read CString from file that contains 0")]
    FileContainsNil,
    #[fail(display = "Failed to read UTF-8 text from file")]
    FileNotUtf8,
    #[fail(display = "Failed get executable path")]
    FailedToGetExePath,
}

impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}

/// Read-only view of an asset directory.
pub struct Resources {
    root_path: PathBuf,
}

impl Resources {
    /// Resolves `rel_path` against the directory of the running executable.
    pub fn from_relative_exe_path(rel_path: &Path) -> Result<Resources, Error> {
        let exe_file_name = ::std::env::current_exe().map_err(|_| Error::FailedToGetExePath)?;

        let exe_path = exe_file_name.parent().ok_or(Error::FailedToGetExePath)?;

        Ok(Resources::from_path(exe_path.join(rel_path)))
    }

    pub fn from_path<P: Into<PathBuf>>(root_path: P) -> Resources {
        Resources {
            root_path: root_path.into(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn load_cstring(&self, resource_name: &str) -> Result<ffi::CString, Error> {
        let buffer = self.load_bytes(resource_name)?;

        // check for nul byte
        if buffer.iter().any(|i| *i == 0) {
            return Err(Error::FileContainsNil);
        }

        Ok(unsafe { ffi::CString::from_vec_unchecked(buffer) })
    }

    pub fn load_string(&self, resource_name: &str) -> Result<String, Error> {
        let buffer = self.load_bytes(resource_name)?;
        String::from_utf8(buffer).map_err(|_| Error::FileNotUtf8)
    }

    fn load_bytes(&self, resource_name: &str) -> Result<Vec<u8>, Error> {
        let path = resource_name_to_path(&self.root_path, resource_name);
        trace!("loading resource {}", path.display());

        let mut file = fs::File::open(path)?;

        let mut buffer: Vec<u8> = Vec::with_capacity(file.metadata()?.len() as usize + 1);
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

fn resource_name_to_path(root_dir: &Path, location: &str) -> PathBuf {
    let mut path: PathBuf = root_dir.into();

    for part in location.split("/") {
        path = path.join(part);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = ::std::env::temp_dir().join(format!("gl-steps-{}-{}", name, ::std::process::id()));
        fs::create_dir_all(dir.join("shaders")).unwrap();
        dir
    }

    #[test]
    fn resource_name_to_path_splits_on_slash() {
        let path = resource_name_to_path(Path::new("assets"), "shaders/shader.vs");
        assert_eq!(path, Path::new("assets").join("shaders").join("shader.vs"));
    }

    #[test]
    fn loads_cstring_from_nested_name() {
        let dir = scratch_dir("cstring");
        fs::File::create(dir.join("shaders").join("a.vert"))
            .unwrap()
            .write_all(b"#version 330 core\n")
            .unwrap();

        let res = Resources::from_path(dir.clone());
        let source = res.load_cstring("shaders/a.vert").unwrap();
        assert_eq!(source.to_str().unwrap(), "#version 330 core\n");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rejects_file_with_nul() {
        let dir = scratch_dir("nul");
        fs::File::create(dir.join("bad.frag"))
            .unwrap()
            .write_all(b"void main()\0{}")
            .unwrap();

        let res = Resources::from_path(dir.clone());
        match res.load_cstring("bad.frag") {
            Err(Error::FileContainsNil) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = Resources::from_path(::std::env::temp_dir().join("gl-steps-does-not-exist"));
        match res.load_string("nothing.vs") {
            Err(Error::Io(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn exe_relative_root_is_next_to_binary() {
        let res = Resources::from_relative_exe_path(Path::new("assets")).unwrap();
        let exe = ::std::env::current_exe().unwrap();
        assert_eq!(res.root_path(), exe.parent().unwrap().join("assets").as_path());
    }
}
