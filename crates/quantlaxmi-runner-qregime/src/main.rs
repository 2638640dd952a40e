//! QuantLaxmi Quantum Regime - CLI entry point.

fn main() -> anyhow::Result<()> {
    quantlaxmi_runner_qregime::run()
}
