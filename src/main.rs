use std::time::Instant;
use barracuda::app::{self, App};
use barracuda::driver::Solver;
use barracuda::io;
use barracuda::solver::ExecutionMode;




fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let input = match std::env::args().nth(1) {
        Some(input) => input,
        None => {
            println!("{} {}", app::DESCRIPTION, app::VERSION);
            println!("usage: barracuda <preset|config.yaml|chkpt.*.cbor>");
            println!("presets: {}", App::presets().iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", "));
            return Ok(());
        }
    };

    let app = App::from_preset_or_file(&input)?.validate()?;
    run(app)
}




fn run(app: App) -> anyhow::Result<()> {
    let App { state, mut tasks, config, .. } = app;
    let control = config.control.clone();

    if let ExecutionMode::ThreadParallel = control.execution_mode {
        rayon::ThreadPoolBuilder::new()
            .num_threads(control.num_threads())
            .build_global()?;
    }

    log::info!("{} {}", app::DESCRIPTION, app::VERSION);
    log::info!("backend: {:?}", control.execution_mode);

    let mut solver = Solver::new(
        config.mesh,
        config.physics.clone(),
        control.boundary_condition,
        control.execution_mode,
        state,
    );
    let zones_per_fold = (config.mesh.num_total_zones() * control.fold) as f64;

    while solver.time() < control.final_time {

        if tasks.write_checkpoint.is_due(solver.time()) {
            write_checkpoint(&solver, &tasks, &config)?;
            tasks.write_checkpoint.advance(control.checkpoint_interval);
        }

        let dt = solver.time_step();
        let start = Instant::now();

        for _ in 0..control.fold {
            solver.advance(dt);
        }

        let mzps = zones_per_fold / start.elapsed().as_secs_f64() * 1e-6;
        log::info!(
            "[{}] t={:.4} dt={:.3e} Mzps={:.3}",
            solver.iteration(),
            solver.time(),
            dt,
            mzps,
        );
    }

    write_checkpoint(&solver, &tasks, &config)?;
    Ok(())
}




fn write_checkpoint(
    solver: &Solver,
    tasks: &barracuda::tasks::Tasks,
    config: &barracuda::app::Configuration,
) -> anyhow::Result<()> {
    let filename = io::checkpoint_filename(
        &config.control.output_directory,
        tasks.write_checkpoint.count,
    );
    let app = App {
        state: solver.state(),
        tasks: tasks.clone(),
        config: config.clone(),
        version: app::VERSION.to_string(),
    };
    log::info!("write {}", filename);
    io::write_cbor(&app, &filename)?;
    Ok(())
}
