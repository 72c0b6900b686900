//! Container invocation definition and argument construction.

use dockcheck_core::LaunchError;

/// The three user inputs describing one `docker run`.
///
/// `command` and `options` are kept as raw strings and split with shell
/// quoting rules when the invocation is built, so a malformed value is
/// reported as a [`LaunchError`] by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Image reference, e.g. `alpine:3.20`.
    pub image: String,

    /// Command run inside the container (may be empty).
    pub command: String,

    /// Extra `docker run` options placed before the image.
    pub options: String,
}

impl ContainerSpec {
    pub fn new(
        image: impl Into<String>,
        command: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            command: command.into(),
            options: options.into(),
        }
    }

    /// Arguments for the runtime binary:
    /// `run --rm {options} {image} {command}`.
    pub fn run_args(&self) -> Result<Vec<String>, LaunchError> {
        let image = self.image.trim();
        if image.is_empty() {
            return Err(LaunchError::InvalidArguments {
                field: "image",
                message: "image must not be empty".to_string(),
            });
        }
        if image.chars().any(char::is_whitespace) {
            return Err(LaunchError::InvalidArguments {
                field: "image",
                message: format!("image {image:?} must not contain whitespace"),
            });
        }

        let options = split("options", &self.options)?;
        let command = split("command", &self.command)?;

        let mut args = Vec::with_capacity(3 + options.len() + command.len());
        args.push("run".to_string());
        args.push("--rm".to_string());
        args.extend(options);
        args.push(image.to_string());
        args.extend(command);
        Ok(args)
    }
}

impl std::fmt::Display for ContainerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = [
            "docker run --rm",
            self.options.trim(),
            self.image.trim(),
            self.command.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
        f.write_str(&line)
    }
}

fn split(field: &'static str, value: &str) -> Result<Vec<String>, LaunchError> {
    shell_words::split(value).map_err(|e| LaunchError::InvalidArguments {
        field,
        message: format!("{e} in {value:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation() {
        let spec = ContainerSpec::new("alpine", "true", "");
        assert_eq!(spec.run_args().unwrap(), vec!["run", "--rm", "alpine", "true"]);
    }

    #[test]
    fn options_precede_image_and_command_follows() {
        let spec = ContainerSpec::new("alpine:3.20", "ls -la /src", "-v /tmp:/src --workdir /src");
        assert_eq!(
            spec.run_args().unwrap(),
            vec![
                "run", "--rm", "-v", "/tmp:/src", "--workdir", "/src", "alpine:3.20", "ls", "-la",
                "/src"
            ]
        );
    }

    #[test]
    fn quoted_command_stays_one_argument() {
        let spec = ContainerSpec::new("alpine", r#"sh -c "echo out; echo err 1>&2; exit 3""#, "");
        assert_eq!(
            spec.run_args().unwrap(),
            vec!["run", "--rm", "alpine", "sh", "-c", "echo out; echo err 1>&2; exit 3"]
        );
    }

    #[test]
    fn empty_command_runs_image_default() {
        let spec = ContainerSpec::new("hello-world", "", "");
        assert_eq!(spec.run_args().unwrap(), vec!["run", "--rm", "hello-world"]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = ContainerSpec::new("  ", "true", "").run_args().unwrap_err();
        assert!(matches!(
            err,
            LaunchError::InvalidArguments { field: "image", .. }
        ));
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let err = ContainerSpec::new("alpine", "sh -c \"echo", "")
            .run_args()
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::InvalidArguments {
                field: "command",
                ..
            }
        ));
    }

    #[test]
    fn display_reads_like_shell_line() {
        let spec = ContainerSpec::new("alpine", "true", "--network none");
        assert_eq!(spec.to_string(), "docker run --rm --network none alpine true");
        assert_eq!(
            ContainerSpec::new("alpine", "", "").to_string(),
            "docker run --rm alpine"
        );
    }
}
