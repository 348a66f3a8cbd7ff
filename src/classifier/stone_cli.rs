//! 肌トーン判定コマンド連携モジュール
//!
//! 外部の判定コマンド（既定: stone）を子プロセスとして実行し、
//! 標準出力のJSONを ClassifierReport としてパースする。
//! レポート画像の生成は常に無効（速度優先）。

use super::ToneClassifier;
use crate::config::Config;
use crate::error::{Result, SleuthError};
use skin_sleuth_common::{parse_classifier_response, ClassifierOutcome};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

const IMAGE_PLACEHOLDER: &str = "{image}";
const REPORT_IMAGE_PLACEHOLDER: &str = "{report_image}";

#[derive(Debug, Clone)]
pub struct StoneCli {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl StoneCli {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.classifier_command.clone(),
            config.classifier_args.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// コマンドが起動できるか確認（終了コードは問わない）
    ///
    /// 応答しないコマンドはタイムアウトで利用不可とする。
    pub async fn probe(&self) -> std::result::Result<(), String> {
        let mut command = Command::new(&self.command);
        command
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.status()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                Err(format!("{}: コマンドが見つかりません", self.command))
            }
            Ok(Err(e)) => Err(format!("{}: 起動できません: {}", self.command, e)),
            Err(_) => Err(format!(
                "{}: {}秒以内に起動確認が終わりませんでした",
                self.command,
                self.timeout.as_secs_f32()
            )),
        }
    }

    fn build_args(&self, image: &Path) -> Vec<String> {
        let image = image.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(IMAGE_PLACEHOLDER, &image)
                    .replace(REPORT_IMAGE_PLACEHOLDER, "false")
            })
            .collect()
    }

    async fn run(&self, image: &Path) -> Result<String> {
        let args = self.build_args(image);
        tracing::debug!(command = %self.command, ?args, "running classifier");

        let mut command = Command::new(&self.command);
        command
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                SleuthError::ClassifierRuntime(format!(
                    "{}秒以内に応答がありませんでした",
                    self.timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| SleuthError::ClassifierRuntime(format!("{} 実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SleuthError::ClassifierRuntime(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        tracing::debug!(len = response.len(), "classifier response");
        Ok(response)
    }
}

impl ToneClassifier for StoneCli {
    async fn classify(&self, image: &Path) -> ClassifierOutcome {
        let response = match self.run(image).await {
            Ok(response) => response,
            Err(e) => return ClassifierOutcome::RuntimeError(e.to_string()),
        };

        match parse_classifier_response(&response) {
            Ok(report) => report.into_outcome(),
            Err(e) => ClassifierOutcome::RuntimeError(e.to_string()),
        }
    }
}
