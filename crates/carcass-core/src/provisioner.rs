//! The provisioning state machine
//!
//! Servers are processed one at a time, backends in configuration order and
//! then the proxy. Each server walks through [`ProvisionStage`] strictly in
//! order; a failure ends that server only and is recorded in its
//! [`ServerReport`] together with the stage that could not be reached.

use carcass_artifacts::{ArtifactIdentity, ArtifactSource};
use carcass_fs::{NormalizedPath, io};
use carcass_meta::{BackendDescriptor, PluginReference, ProvisioningConfig};
use carcass_plugins::stage_plugins;

use crate::document;
use crate::error::{Error, Result};
use crate::launch::{self, StartScripts};
use crate::report::{ProvisionStage, RunMode, RunReport, ServerFailure, ServerReport, ServerRole};
use crate::topology::{build_backend_trust_config, build_proxy_routing};

const PLUGINS_DIR: &str = "plugins";

type StageResult<T> = std::result::Result<T, ServerFailure>;

/// Attach the stage being attempted to an error.
trait AtStage<T> {
    fn at(self, stage: ProvisionStage) -> StageResult<T>;
}

impl<T, E: Into<Error>> AtStage<T> for std::result::Result<T, E> {
    fn at(self, stage: ProvisionStage) -> StageResult<T> {
        self.map_err(|e| ServerFailure {
            stage,
            error: e.into(),
        })
    }
}

/// Drives a run over an immutable configuration.
pub struct Provisioner<'a> {
    config: &'a ProvisioningConfig,
    source: &'a dyn ArtifactSource,
}

impl<'a> Provisioner<'a> {
    pub fn new(config: &'a ProvisioningConfig, source: &'a dyn ArtifactSource) -> Self {
        Self { config, source }
    }

    /// Checks that must pass before anything on disk is touched.
    fn preflight(&self) -> Result<()> {
        if !self.config.eula_accepted {
            return Err(Error::EulaNotAccepted);
        }
        self.config.validate()?;
        Ok(())
    }

    /// Wipe and rebuild every server directory.
    ///
    /// Returns `Err` only when the run could not start at all; per-server
    /// failures are reported in the [`RunReport`].
    pub async fn provision(&self) -> Result<RunReport> {
        self.preflight()?;
        tracing::info!(
            root = %self.config.root,
            backends = self.config.backends.len(),
            "Provisioning network"
        );

        let mut run = RunReport::new(RunMode::Provision);

        for backend in &self.config.backends {
            let mut report = ServerReport::new(&backend.name, ServerRole::Backend);
            tracing::info!(
                server = %backend.name,
                family = %backend.family,
                port = backend.port,
                "Creating backend server"
            );
            if let Err(failure) = self.provision_backend(backend, &mut report).await {
                record_failure(&mut report, failure);
            }
            run.servers.push(report);
        }

        let proxy = &self.config.proxy;
        let mut report = ServerReport::new(&proxy.name, ServerRole::Proxy);
        tracing::info!(
            server = %proxy.name,
            family = %proxy.family,
            port = proxy.port,
            "Creating proxy server"
        );
        if let Err(failure) = self.provision_proxy(&mut report).await {
            record_failure(&mut report, failure);
        }
        run.servers.push(report);

        Ok(run)
    }

    /// Replace only the `plugins/` directory of every existing backend.
    ///
    /// Configuration, artifacts and world data are left untouched and the
    /// proxy is skipped.
    pub async fn update_plugins(&self) -> Result<RunReport> {
        self.preflight()?;
        tracing::info!(root = %self.config.root, "Updating backend plugins");

        let mut run = RunReport::new(RunMode::UpdatePlugins);

        for backend in &self.config.backends {
            let mut report = ServerReport::new(&backend.name, ServerRole::Backend);
            if let Err(failure) = self.update_backend_plugins(backend, &mut report) {
                record_failure(&mut report, failure);
            }
            run.servers.push(report);
        }

        Ok(run)
    }

    async fn provision_backend(
        &self,
        backend: &BackendDescriptor,
        report: &mut ServerReport,
    ) -> StageResult<()> {
        let dir = self.config.server_dir(&backend.name);

        self.create_server_dir(&dir, backend.family.subdirectories(), report)?;

        let identity = ArtifactIdentity::new(backend.family.project(), &self.config.backend_version);
        self.fetch_artifact(&identity, &dir.join(backend.family.jar_name()))
            .await?;
        advance(report, ProvisionStage::ArtifactFetched);

        let trust = build_backend_trust_config(backend);
        let stage = ProvisionStage::Configured;
        write_document(&dir.join("eula.txt"), &document::eula_document(backend)).at(stage)?;
        write_document(
            &dir.join("spigot.yml"),
            &document::spigot_document(backend, &trust).at(stage)?,
        )
        .at(stage)?;
        write_document(
            &dir.join("config").join("paper-global.yml"),
            &document::paper_global_document(backend, &trust).at(stage)?,
        )
        .at(stage)?;
        write_document(
            &dir.join("server.properties"),
            &document::server_properties(backend, &trust),
        )
        .at(stage)?;
        if !self.config.operators.is_empty() {
            write_document(
                &dir.join("ops.json"),
                &document::ops_document(&self.config.operators).at(stage)?,
            )
            .at(stage)?;
        }
        advance(report, stage);

        stage_into(&backend.plugin_files, &backend.plugin_folders, &dir, report)?;

        emit_start_scripts(&dir, &launch::backend_launch_args(backend))?;
        advance(report, ProvisionStage::ScriptsEmitted);
        Ok(())
    }

    async fn provision_proxy(&self, report: &mut ServerReport) -> StageResult<()> {
        let proxy = &self.config.proxy;
        let dir = self.config.server_dir(&proxy.name);

        self.create_server_dir(&dir, proxy.family.subdirectories(), report)?;

        let identity = ArtifactIdentity::new(proxy.family.project(), &self.config.proxy_version);
        self.fetch_artifact(&identity, &dir.join(proxy.family.jar_name()))
            .await?;
        advance(report, ProvisionStage::ArtifactFetched);

        let stage = ProvisionStage::Configured;
        let routing = build_proxy_routing(proxy, &self.config.backends).at(stage)?;
        let config = document::proxy_config_document(proxy, &self.config.proxy_version, &routing)
            .at(stage)?;
        write_document(&dir.join("config.yml"), &config).at(stage)?;
        advance(report, stage);

        stage_into(&proxy.plugin_files, &proxy.plugin_folders, &dir, report)?;

        emit_start_scripts(&dir, &launch::proxy_launch_args(proxy))?;
        advance(report, ProvisionStage::ScriptsEmitted);
        Ok(())
    }

    fn update_backend_plugins(
        &self,
        backend: &BackendDescriptor,
        report: &mut ServerReport,
    ) -> StageResult<()> {
        let dir = self.config.server_dir(&backend.name);
        if !dir.is_dir() {
            return Err(ServerFailure {
                stage: ProvisionStage::PluginsStaged,
                error: Error::ServerMissing {
                    server: backend.name.clone(),
                    path: dir.to_native(),
                },
            });
        }

        io::recreate_dir(&dir.join(PLUGINS_DIR)).at(ProvisionStage::PluginsStaged)?;
        stage_into(&backend.plugin_files, &backend.plugin_folders, &dir, report)
    }

    /// `Created` then `Scaffolded`.
    fn create_server_dir(
        &self,
        dir: &NormalizedPath,
        subdirectories: &[&str],
        report: &mut ServerReport,
    ) -> StageResult<()> {
        let existed = dir.exists();
        io::recreate_dir(dir).at(ProvisionStage::Created)?;
        if existed {
            tracing::debug!(dir = %dir, "Replaced existing server directory");
        }
        advance(report, ProvisionStage::Created);

        io::create_subdirectories(dir, subdirectories).at(ProvisionStage::Scaffolded)?;
        advance(report, ProvisionStage::Scaffolded);
        Ok(())
    }

    async fn fetch_artifact(
        &self,
        identity: &ArtifactIdentity,
        destination: &NormalizedPath,
    ) -> StageResult<()> {
        let stage = ProvisionStage::ArtifactFetched;
        let artifact = self.source.resolve(identity).await.at(stage)?;
        tracing::info!(
            project = %identity.project,
            version = %identity.version,
            build = artifact.build,
            "Downloading {}",
            artifact.file_name
        );
        self.source
            .fetch(&artifact, &destination.to_native())
            .await
            .at(stage)?;
        Ok(())
    }
}

fn advance(report: &mut ServerReport, stage: ProvisionStage) {
    tracing::debug!(server = %report.name, stage = %stage, "Stage complete");
    report.reached = Some(stage);
}

fn record_failure(report: &mut ServerReport, failure: ServerFailure) {
    tracing::error!(
        server = %report.name,
        role = %report.role,
        stage = %failure.stage,
        error = %failure.error,
        "Server failed"
    );
    report.failure = Some(failure);
}

fn write_document(path: &NormalizedPath, content: &str) -> Result<()> {
    io::write_text(path, content)?;
    tracing::debug!(path = %path, "Wrote document");
    Ok(())
}

fn stage_into(
    files: &[PluginReference],
    folders: &[PluginReference],
    dir: &NormalizedPath,
    report: &mut ServerReport,
) -> StageResult<()> {
    let stage = ProvisionStage::PluginsStaged;
    let staging = stage_plugins(files, folders, &dir.join(PLUGINS_DIR).to_native()).at(stage)?;
    report.plugins_staged = staging.copied.len();
    report.warnings = staging.warnings;
    advance(report, stage);
    Ok(())
}

fn emit_start_scripts(dir: &NormalizedPath, args: &str) -> StageResult<()> {
    let stage = ProvisionStage::ScriptsEmitted;
    let native = dir.to_native();
    let absolute = std::path::absolute(&native)
        .map_err(|e| carcass_fs::Error::io(&native, e))
        .at(stage)?;

    let StartScripts { batch, powershell } = launch::start_scripts(&absolute, args);
    write_document(&dir.join("start.bat"), &batch).at(stage)?;
    write_document(&dir.join("start.ps1"), &powershell).at(stage)?;
    Ok(())
}
