//! File built-ins (§6.4), grounded in the distilled reference's
//! `stdlib/file_tools.py`. Every OS-level failure is wrapped as a
//! `FileError` rather than surfacing the raw `std::io::Error`.

use std::fs;

use super::{def, string};
use crate::error::KaynatError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub fn register(env: &Environment) {
    def(env, "read_file", |args| {
        let path = string(args, 0, "read_file")?;
        let content = fs::read_to_string(&path).map_err(|e| file_error(&path, e))?;
        Ok(Value::String(content))
    });

    def(env, "read_lines", |args| {
        let path = string(args, 0, "read_lines")?;
        let content = fs::read_to_string(&path).map_err(|e| file_error(&path, e))?;
        let lines = content.lines().map(|l| Value::String(l.to_string())).collect();
        Ok(Value::list(lines))
    });

    def(env, "write_file", |args| {
        let path = string(args, 0, "write_file")?;
        let content = string(args, 1, "write_file")?;
        fs::write(&path, content).map_err(|e| file_error(&path, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "append_file", |args| {
        use std::io::Write;
        let path = string(args, 0, "append_file")?;
        let content = string(args, 1, "append_file")?;
        let mut file = fs::OpenOptions::new().create(true).append(true).open(&path).map_err(|e| file_error(&path, e))?;
        file.write_all(content.as_bytes()).map_err(|e| file_error(&path, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "file_exists", |args| {
        let path = string(args, 0, "file_exists")?;
        Ok(Value::Boolean(fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false)))
    });

    def(env, "delete_file", |args| {
        let path = string(args, 0, "delete_file")?;
        fs::remove_file(&path).map_err(|e| file_error(&path, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "copy_file", |args| {
        let src = string(args, 0, "copy_file")?;
        let dst = string(args, 1, "copy_file")?;
        fs::copy(&src, &dst).map_err(|e| file_error(&src, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "move_file", |args| {
        let src = string(args, 0, "move_file")?;
        let dst = string(args, 1, "move_file")?;
        fs::rename(&src, &dst).map_err(|e| file_error(&src, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "create_directory", |args| {
        let path = string(args, 0, "create_directory")?;
        fs::create_dir_all(&path).map_err(|e| file_error(&path, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "delete_directory", |args| {
        let path = string(args, 0, "delete_directory")?;
        fs::remove_dir_all(&path).map_err(|e| file_error(&path, e))?;
        Ok(Value::Boolean(true))
    });

    def(env, "directory_exists", |args| {
        let path = string(args, 0, "directory_exists")?;
        Ok(Value::Boolean(fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)))
    });

    def(env, "list_directory", |args| {
        let path = string(args, 0, "list_directory")?;
        let entries = fs::read_dir(&path).map_err(|e| file_error(&path, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| file_error(&path, e))?;
            names.push(Value::String(entry.file_name().to_string_lossy().into_owned()));
        }
        Ok(Value::list(names))
    });
}

fn file_error(path: &str, err: std::io::Error) -> KaynatError {
    if err.kind() == std::io::ErrorKind::NotFound {
        KaynatError::file_error(format!("file not found: {path}"))
    } else {
        KaynatError::file_error(format!("{path}: {err}"))
    }
}
