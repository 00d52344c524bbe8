//! End-to-end scan of a small Express project written to disk.

use routescope::{Corpus, FsCorpus, HttpMethod, RouteScanner, RoutescopeConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn fixture(root: &Path) {
    write(
        root,
        "src/server.ts",
        r#"import express from 'express';
import v1 from './api/v1';
import health from './health';

const API_PREFIX = '/api';
const app = express();

app.use(express.json());
app.use(`${API_PREFIX}/v1`, v1);
app.use(`${API_PREFIX}/v2`, v1);
app.use(health);

app.listen(3000);
"#,
    );
    write(
        root,
        "src/api/v1/index.ts",
        r#"import { Router } from 'express';
import users from '../users';

const router = Router();
router.use('/users', users);
router.get('/status', (req, res) => res.json({ ok: true }));

export default router;
"#,
    );
    write(
        root,
        "src/api/users.js",
        r#"const express = require('express');
const users = express.Router();
const BY_ID = '/:id';

users.get(['/', '/all'], list);
users
  .route(BY_ID)
  .get(show)
  .put(update);
users.delete(path.join(BY_ID, 'avatar'), removeAvatar);
users.post(dynamicPath(), create);

module.exports = users;
"#,
    );
    write(
        root,
        "src/health.js",
        "const router = require('express').Router();\nrouter.get('/healthz', ok);\nmodule.exports = router;\n",
    );
    write(
        root,
        "node_modules/express/lib/router.js",
        "router.get('/should-not-appear', h);\n",
    );
    write(root, ".env", "PORT=3000\nAPI_URL=\"http://localhost:3000\"\n");
}

#[test]
fn test_scan_fixture_project() {
    let dir = tempdir().unwrap();
    fixture(dir.path());

    let result = RouteScanner::default().scan_dir(dir.path()).unwrap();
    let summary: Vec<String> = result
        .routes
        .iter()
        .map(|r| format!("{} {}", r.method, r.full_path))
        .collect();

    assert_eq!(
        summary,
        vec![
            "GET /api/v1/status",
            "GET /api/v1/users/",
            "GET /api/v1/users/:id",
            "PUT /api/v1/users/:id",
            "DELETE /api/v1/users/:id/avatar",
            "GET /api/v1/users/all",
            "POST /api/v1/users/dynamicPath()",
            "GET /api/v2/status",
            "GET /api/v2/users/",
            "GET /api/v2/users/:id",
            "PUT /api/v2/users/:id",
            "DELETE /api/v2/users/:id/avatar",
            "GET /api/v2/users/all",
            "POST /api/v2/users/dynamicPath()",
            "GET /healthz",
        ]
    );
    assert_eq!(result.base_url.as_deref(), Some("http://localhost:3000"));

    let put = result
        .routes
        .iter()
        .find(|r| r.method == HttpMethod::Put)
        .unwrap();
    assert!(put.file.ends_with("src/api/users.js"));
    assert_eq!(put.line, 8);
    assert_eq!(put.resolved_path.as_deref(), Some("/:id"));
}

#[test]
fn test_scan_fixture_mounts() {
    let dir = tempdir().unwrap();
    fixture(dir.path());

    let config = RoutescopeConfig::default();
    let corpus = FsCorpus::new(dir.path(), &config.scan).unwrap();
    assert_eq!(corpus.list_files().unwrap().len(), 4);

    let report = RouteScanner::new(config).analyze(&corpus).unwrap();
    assert!(!report.prefixes.truncated);

    let users = dir.path().join("src/api/users.js");
    let prefixes: Vec<&str> = report.prefixes.prefixes_of(&users).collect();
    assert_eq!(prefixes, vec!["/api/v1/users", "/api/v2/users"]);

    let health = dir.path().join("src/health.js");
    let prefixes: Vec<&str> = report.prefixes.prefixes_of(&health).collect();
    assert_eq!(prefixes, vec![""]);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    assert!(RouteScanner::default()
        .scan_dir(&dir.path().join("missing"))
        .is_err());
}
