use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::Utc;
use warden_auth::{CredentialCodec, TokenService};
use warden_core::{CredentialDigest, Email, TenantId, User};

fn sample_user() -> User {
    User::local(
        Email::parse("bench@example.com").unwrap(),
        CredentialDigest::new("$2b$04$unused"),
        TenantId::new(),
        Utc::now(),
    )
}

fn bench_token_issue(c: &mut Criterion) {
    let service = TokenService::new(b"bench-secret");
    let user = sample_user();

    c.bench_function("token_issue", |b| {
        b.iter(|| service.issue(black_box(&user)).unwrap())
    });
}

fn bench_token_validate(c: &mut Criterion) {
    let service = TokenService::new(b"bench-secret");
    let token = service.issue(&sample_user()).unwrap();

    c.bench_function("token_validate", |b| {
        b.iter(|| service.validate(black_box(&token)).unwrap())
    });
}

/// Hashing cost grows exponentially with the work factor; this shows the
/// latency each configured `BCRYPT_COST` adds to registration and login.
fn bench_credential_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("credential_verify");
    group.sample_size(10);

    for cost in [4u32, 8, 10] {
        let codec = CredentialCodec::new(cost).unwrap();
        let digest = codec.hash("correct horse battery staple").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cost), &cost, |b, _| {
            b.iter(|| codec.verify(black_box("correct horse battery staple"), &digest).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_token_issue,
    bench_token_validate,
    bench_credential_verify
);
criterion_main!(benches);
