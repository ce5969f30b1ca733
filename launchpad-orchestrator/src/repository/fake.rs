//! In-memory repositories for service tests

use async_trait::async_trait;
use launchpad_client::{ClientError, RawResponse, Result};
use launchpad_core::domain::artifact::Artifact;
use launchpad_core::domain::build::{Build, BuildRef, Outcome, Workflow};
use launchpad_core::domain::credential::ServiceAccountKey;
use launchpad_core::domain::project::{Branch, Project};
use launchpad_core::dto::billing::SkuList;
use launchpad_core::dto::trigger::TriggerBuildRequest;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{BuildRepository, KeyRepository, ObjectRepository, PriceCatalog};

pub fn build(num: u64, job: Option<&str>, outcome: Option<Outcome>, prev: Option<u64>) -> Build {
    Build {
        build_num: num,
        workflows: job.map(|j| Workflow {
            job_name: j.to_string(),
        }),
        outcome,
        previous_successful_build: prev.map(|n| BuildRef { build_num: n }),
    }
}

pub fn project(vcs_url: &str, reponame: &str, branch: &str, last_success: u64) -> Project {
    let mut branches = HashMap::new();
    branches.insert(
        branch.to_string(),
        Branch {
            last_success: Some(BuildRef {
                build_num: last_success,
            }),
        },
    );
    Project {
        vcs_url: vcs_url.to_string(),
        reponame: reponame.to_string(),
        branches,
    }
}

/// CI fake
///
/// Each build number maps to a queue of snapshots; every fetch pops one until
/// only the last remains, which is then returned forever.
#[derive(Default)]
pub struct FakeBuilds {
    projects: Vec<Project>,
    builds: Mutex<HashMap<u64, VecDeque<Build>>>,
    artifacts: HashMap<u64, Vec<Artifact>>,
    trigger_response: Option<RawResponse>,
    pub fetched: Mutex<Vec<u64>>,
    pub triggered: Mutex<Vec<TriggerBuildRequest>>,
    pub calls: AtomicUsize,
}

impl FakeBuilds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_build(self, build: Build) -> Self {
        self.with_snapshots(build.build_num, vec![build])
    }

    pub fn with_snapshots(self, build_num: u64, snapshots: Vec<Build>) -> Self {
        self.builds
            .lock()
            .unwrap()
            .insert(build_num, snapshots.into());
        self
    }

    pub fn with_artifacts(mut self, build_num: u64, urls: &[&str]) -> Self {
        let artifacts = urls
            .iter()
            .map(|u| Artifact {
                url: u.to_string(),
                path: None,
            })
            .collect();
        self.artifacts.insert(build_num, artifacts);
        self
    }

    pub fn with_trigger_response(mut self, status: u16, body: &str) -> Self {
        self.trigger_response = Some(RawResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn fetch_count(&self, build_num: u64) -> usize {
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .filter(|n| **n == build_num)
            .count()
    }
}

#[async_trait]
impl BuildRepository for FakeBuilds {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.projects.clone())
    }

    async fn get_build(&self, _repo: &str, build_num: u64) -> Result<Build> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(build_num);

        let mut builds = self.builds.lock().unwrap();
        let snapshots = builds
            .get_mut(&build_num)
            .ok_or_else(|| ClientError::api_error(404, "Build not found"))?;

        if snapshots.len() > 1 {
            Ok(snapshots.pop_front().unwrap())
        } else {
            Ok(snapshots[0].clone())
        }
    }

    async fn list_artifacts(&self, _repo: &str, build_num: u64) -> Result<Vec<Artifact>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.artifacts.get(&build_num).cloned().unwrap_or_default())
    }

    async fn trigger_build(
        &self,
        _repo: &str,
        _branch: &str,
        req: &TriggerBuildRequest,
    ) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.triggered.lock().unwrap().push(req.clone());
        self.trigger_response
            .clone()
            .ok_or_else(|| ClientError::InvalidRequest("no trigger response scripted".into()))
    }
}

/// IAM fake that records created and revoked keys
pub struct FakeKeys {
    project_id: String,
    fail_create: bool,
    fail_revoke: bool,
    pub created: AtomicUsize,
    pub revoked: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl FakeKeys {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            fail_create: false,
            fail_revoke: false,
            created: AtomicUsize::new(0),
            revoked: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_revoke(mut self) -> Self {
        self.fail_revoke = true;
        self
    }

    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyRepository for FakeKeys {
    async fn project_id(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.project_id.clone())
    }

    async fn create_app_engine_key(&self, project_id: &str) -> Result<ServiceAccountKey> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(ClientError::api_error(403, "iam.serviceAccountKeys.create denied"));
        }

        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ServiceAccountKey {
            name: format!("projects/{project_id}/serviceAccounts/sa/keys/{n}"),
            material: format!("{{\"key\":{n}}}"),
        })
    }

    async fn revoke_key(&self, key_name: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.revoked.lock().unwrap().push(key_name.to_string());
        if self.fail_revoke {
            return Err(ClientError::api_error(500, "backend error"));
        }
        Ok(())
    }
}

/// Object storage fake
#[derive(Default)]
pub struct FakeObjects {
    objects: HashMap<(String, String), String>,
    pub uploads: Mutex<Vec<(String, String, String)>>,
    pub calls: AtomicUsize,
}

impl FakeObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, bucket: &str, object: &str, body: &str) -> Self {
        self.objects
            .insert((bucket.to_string(), object.to_string()), body.to_string());
        self
    }
}

#[async_trait]
impl ObjectRepository for FakeObjects {
    async fn download(&self, bucket: &str, object: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.objects
            .get(&(bucket.to_string(), object.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::api_error(404, "No such object"))
    }

    async fn upload_public_json(&self, bucket: &str, object: &str, body: String) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap()
            .push((bucket.to_string(), object.to_string(), body));
        Ok(())
    }
}

/// Billing catalog fake
pub struct FakePrices {
    pub skus: SkuList,
}

#[async_trait]
impl PriceCatalog for FakePrices {
    async fn list_skus(&self, _service_id: &str) -> Result<SkuList> {
        Ok(self.skus.clone())
    }
}
