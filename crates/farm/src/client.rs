// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking REST client for the farm.
//!
//! Every operation is one authenticated request; sessions are short-lived
//! and nothing is cached here beyond the current user's id.

use crate::api::Farm;
use crate::error::FarmError;
use crate::filter::{render_filter, schema, FieldSchema, FilterValue};
use crate::run::{ProjectUpdate, RunRequest};
use dp_core::{Device, DeviceGroup, FileEntry, Framework, InputType, OsType, Project, TestRun};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// List envelope returned by every collection endpoint.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Me {
    id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceProblem {
    device_name: String,
    problems: Vec<DeviceProblemEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceProblemEntry {
    #[serde(rename = "type")]
    kind: String,
}

pub struct FarmClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    user_id: OnceLock<u64>,
}

impl FarmClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FarmError> {
        let http = reqwest::blocking::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url, api_key: api_key.into(), user_id: OnceLock::new() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v2{}", self.base_url, path)
    }

    /// Listing query: no server-side page limit, plus rendered filter terms.
    fn list_query(
        schema: FieldSchema,
        terms: &[(&str, FilterValue)],
    ) -> Result<Vec<(String, String)>, FarmError> {
        let mut query = vec![("limit".to_string(), "0".to_string())];
        for term in render_filter(schema, terms)? {
            query.push(("filter".to_string(), term));
        }
        Ok(query)
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, FarmError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().unwrap_or_default();
            Err(FarmError::Api { status: status.as_u16(), message })
        }
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<T>, FarmError> {
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(&self.api_key, Some(""))
            .query(query)
            .send()?;
        let body: Collection<T> = Self::check(response)?.json()?;
        Ok(body.data)
    }

    fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, FarmError> {
        let response = self.http.get(self.url(path)).basic_auth(&self.api_key, Some("")).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, FarmError> {
        let response = self
            .http
            .post(self.url(path))
            .basic_auth(&self.api_key, Some(""))
            .form(form)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn delete(&self, path: &str) -> Result<(), FarmError> {
        let response =
            self.http.delete(self.url(path)).basic_auth(&self.api_key, Some("")).send()?;
        Self::check(response)?;
        Ok(())
    }

    /// The current user's id, fetched once and reused for user-scoped paths.
    fn user_id(&self) -> Result<u64, FarmError> {
        if let Some(id) = self.user_id.get() {
            return Ok(*id);
        }
        let me: Me = self.get_one("/me")?;
        let _ = self.user_id.set(me.id);
        Ok(me.id)
    }
}

impl Farm for FarmClient {
    fn devices(&self) -> Result<Vec<Device>, FarmError> {
        self.get_list("/devices", &Self::list_query(schema::DEVICES, &[])?)
    }

    fn offline_device_names(&self, device_model: Option<&str>) -> Result<Vec<String>, FarmError> {
        let problems: Vec<DeviceProblem> = self
            .get_list("/admin/device-problems", &[("limit".to_string(), "0".to_string())])?;
        let mut names = Vec::new();
        for problem in problems {
            let selected = match device_model {
                Some(model) => problem.device_name.starts_with(model),
                // The builder pseudo-device reports problems but runs no tests.
                None => problem.device_name != "Docker Builder",
            };
            if selected && problem.problems.iter().any(|p| p.kind == "OFFLINE") {
                names.push(problem.device_name);
            }
        }
        Ok(names)
    }

    fn device_groups_by_name(&self, display_name: &str) -> Result<Vec<DeviceGroup>, FarmError> {
        let query = Self::list_query(
            schema::DEVICE_GROUPS,
            &[("displayname", FilterValue::from(display_name))],
        )?;
        self.get_list("/device-groups", &query)
    }

    fn create_device_group(
        &self,
        display_name: &str,
        os_type: OsType,
    ) -> Result<DeviceGroup, FarmError> {
        let user_id = self.user_id()?;
        self.post_form(
            &format!("/users/{user_id}/device-groups"),
            &[("displayName", display_name.to_string()), ("osType", os_type.to_string())],
        )
    }

    fn delete_device_group(&self, group_id: u64) -> Result<(), FarmError> {
        self.delete(&format!("/device-groups/{group_id}"))
    }

    fn device_group_devices(&self, group_id: u64) -> Result<Vec<Device>, FarmError> {
        let query = Self::list_query(schema::DEVICE_GROUP_DEVICES, &[])?;
        self.get_list(&format!("/device-groups/{group_id}/devices"), &query)
    }

    fn enabled_device_count(&self, group_id: u64) -> Result<usize, FarmError> {
        let query =
            Self::list_query(schema::DEVICE_GROUP_DEVICES, &[("enabled", FilterValue::from(true))])?;
        let devices: Vec<Device> =
            self.get_list(&format!("/device-groups/{group_id}/devices"), &query)?;
        Ok(devices.len())
    }

    fn add_devices_to_group(
        &self,
        group_id: u64,
        device_ids: &[u64],
    ) -> Result<DeviceGroup, FarmError> {
        let form: Vec<(&str, String)> =
            device_ids.iter().map(|id| ("deviceIds[]", id.to_string())).collect();
        self.post_form(&format!("/device-groups/{group_id}/devices"), &form)
    }

    fn remove_device_from_group(&self, group_id: u64, device_id: u64) -> Result<(), FarmError> {
        self.delete(&format!("/device-groups/{group_id}/devices/{device_id}"))
    }

    fn frameworks_by_name(&self, name: &str) -> Result<Vec<Framework>, FarmError> {
        let query = Self::list_query(schema::FRAMEWORKS, &[("name", FilterValue::from(name))])?;
        self.get_list("/admin/frameworks", &query)
    }

    fn files_by_name(
        &self,
        name: &str,
        input_type: InputType,
    ) -> Result<Vec<FileEntry>, FarmError> {
        let mut query = Self::list_query(
            schema::FILES,
            &[
                ("name", FilterValue::from(name)),
                ("inputtype", FilterValue::from(input_type.to_string())),
            ],
        )?;
        // Oldest first, so the last entry is the most recent upload.
        query.push(("sort".to_string(), "createTime_a".to_string()));
        self.get_list("/files", &query)
    }

    fn upload_file(
        &self,
        project_id: u64,
        path: &Path,
        input_type: InputType,
    ) -> Result<(), FarmError> {
        let user_id = self.user_id()?;
        let form = reqwest::blocking::multipart::Form::new().file("file", path)?;
        let response = self
            .http
            .post(self.url(&format!("/users/{user_id}/projects/{project_id}/files/{input_type}")))
            .basic_auth(&self.api_key, Some(""))
            .multipart(form)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn projects_by_name(&self, name: &str) -> Result<Vec<Project>, FarmError> {
        let query = Self::list_query(schema::PROJECTS, &[("name", FilterValue::from(name))])?;
        let projects: Vec<Project> = self.get_list("/projects", &query)?;
        // The farm keeps archived projects in listings; they are dead to us.
        Ok(projects.into_iter().filter(|p| p.archive_time.is_none()).collect())
    }

    fn create_project(&self, name: &str, project_type: &str) -> Result<Project, FarmError> {
        let user_id = self.user_id()?;
        self.post_form(
            &format!("/users/{user_id}/projects"),
            &[("name", name.to_string()), ("type", project_type.to_string())],
        )
    }

    fn update_project(
        &self,
        project_id: u64,
        name: &str,
        update: &ProjectUpdate,
    ) -> Result<Project, FarmError> {
        let user_id = self.user_id()?;
        self.post_form(
            &format!("/users/{user_id}/projects/{project_id}"),
            &[
                ("archivingItemCount", update.archiving_item_count.to_string()),
                ("archivingStrategy", update.archiving_strategy.to_string()),
                ("description", update.description.clone().unwrap_or_default()),
                ("name", name.to_string()),
            ],
        )
    }

    fn create_run(&self, request: &RunRequest) -> Result<TestRun, FarmError> {
        let response = self
            .http
            .post(self.url("/runs"))
            .basic_auth(&self.api_key, Some(""))
            .json(request)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn active_runs(&self) -> Result<Vec<TestRun>, FarmError> {
        let query = vec![
            ("limit".to_string(), "0".to_string()),
            ("filter".to_string(), "d_endTime_isnull".to_string()),
        ];
        self.get_list("/admin/runs", &query)
    }
}
