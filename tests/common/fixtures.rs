//! Static apiserver log corpora used across harnesses.

use super::builders::RequestLine;
use chrono::NaiveDate;

/// Request lines in the shape the extractor accepts.
pub const CORPUS_REQUESTS: &[&str] = &[
    "I0101 10:20:30.123456 1234 foo.go:56] GET /api/v1/pods: (5ms) 200 [caller-abc 10.0.0.1:443]",
    "I0101 10:20:30.200000 1234 wrap.go:47] LIST /api/v1/namespaces/default/pods?limit=500: (12.345ms) 200 [kubectl/v1.13.4 (linux/amd64) 10.0.0.7:51234]",
    "I0101 10:20:31.000001 1234 wrap.go:47] PUT /api/v1/nodes/node-1/status: (3.1ms) 200 [kubelet/v1.13.4 (linux/amd64) 10.0.0.2:40012]",
    "I0101 10:20:31.500000 1234 wrap.go:47] WATCH /api/v1/pods?resourceVersion=42&watch=true: (9m59.999s) 200 [kube-scheduler/v1.13.4 10.0.0.3:52100]",
    "I0101 10:20:32.000000 1234 wrap.go:47] POST /api/v1/namespaces/default/events: (850.5µs) 201 [kube-controller-manager/v1.13.4 10.0.0.4:33212]",
    "I0101 10:20:32.750000 1234 wrap.go:47] DELETE /api/v1/namespaces/default/pods/web-0: (1.2s) 404 [kubectl/v1.13.4 10.0.0.7:51235]",
    "I0101 23:59:59.999999 1234 wrap.go:47] GET /healthz: (171µs) 200 [kube-probe/1.13 10.0.0.9:8080]",
];

/// Lines that must never produce a row.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "I0101 10:20:30.000000 1234 controller.go:102] Starting endpoint controller",
    "W0101 10:20:30.000000 1234 reflector.go:270] watch of *v1.Pod ended with: too old resource version",
    "E0101 10:20:30.000000 1234 status.go:64] apiserver received an error that is not an metav1.Status",
    "I0101 10:20:30.123456 1234 foo.go:56] GET /api/v1/pods: (5ms) 200",
    "I0101 10:20:30.123456 1234 foo.go:56] GET /api/v1/pods: (5ms) 200 [caller-abc",
    "Log file created at: 2019/01/01 10:20:29",
];

/// Lines that match structurally but carry unparseable sub-fields.
pub const CORPUS_LENIENT: &[&str] = &[
    "I0101 10:20:33.000000 1234 wrap.go:47] GET /api/v1/secrets: (n/a) 200 [caller-x 10.0.0.1:443]",
    "I0101 10:20:34.000000 1234 wrap.go:47] GET /api/v1/secrets: (1ms) 184467440737095516160 [caller-y 10.0.0.1:443]",
];

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid date")
}

/// `n` lines where every third is noise; request paths carry the line
/// number so rows are distinguishable.
pub fn corpus_mixed(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            if i % 3 == 2 {
                CORPUS_NOISE[i % CORPUS_NOISE.len()].to_string()
            } else {
                RequestLine::new(format!("/api/v1/namespaces/ns-{i}/pods"))
                    .micros(i as u64)
                    .build()
            }
        })
        .collect()
}
