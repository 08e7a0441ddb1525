//! Runs each kind of distance-field query on a small level and prints the
//! results as text maps.
//!
//! `@` is the walker, `T` targets, `F` fear sources, `!` threats, `*` the
//! path and `%` slow terrain.

use std::collections::HashMap;
use std::process::ExitCode;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wavefront_core::Point;
use wavefront_paths::{
    AttackRange, BresenhamLos, DijkstraMap, MapConfig, Measurement, Path, PathError, PathRequest,
    SightVisibility, Threat,
};

const LEVEL: &str = "
####################
#........#.........#
#........#..%%%....#
#...##...#..%%%....#
#...##.........#...#
#..............#...#
#######..####..#...#
#..................#
#....#.......#.....#
####################";

const SEED: u64 = 0x5eed;

fn render(map: &DijkstraMap<SmallRng>, path: &Path, marks: &[(Point, char)]) -> String {
    let mut overlay: HashMap<Point, char> = path.steps.iter().map(|&p| (p, '*')).collect();
    overlay.extend(marks.iter().copied());
    let mut out = String::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            let p = Point::new(x, y);
            let ch = match overlay.get(&p) {
                Some(&c) => c,
                None if map.is_wall(p) => '#',
                None if map.cost_at(p).is_some_and(|c| c > 1.0) => '%',
                None => '.',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn report(title: &str, map: &DijkstraMap<SmallRng>, path: &Path, marks: &[(Point, char)]) {
    println!("== {title}: {} steps, {:?}", path.len(), path.status);
    print!("{}", render(map, path, marks));
    println!();
}

fn load() -> Result<DijkstraMap<SmallRng>, PathError> {
    let config = MapConfig::with_measurement(Measurement::Chebyshev);
    let mut map = DijkstraMap::from_text(SmallRng::seed_from_u64(SEED), config, LEVEL)?;
    map.initialize_cost_from_text(LEVEL, |ch| if ch == '%' { 3.0 } else { 1.0 })?;
    Ok(map)
}

fn run() -> Result<(), PathError> {
    let mut map = load()?;
    let hero = Point::new(2, 1);
    let goblin = Point::new(17, 8);
    let ally = [Point::new(6, 7)];

    let req = PathRequest::new(hero, 40).only_passable(&ally);
    let path = map.find_path(&req, &[goblin])?;
    report("seek", &map, &path, &[(hero, '@'), (goblin, 'T')]);

    let path = map.find_path(&PathRequest::new(hero, 5), &[goblin])?;
    report("seek, 5 moves", &map, &path, &[(hero, '@'), (goblin, 'T')]);

    let start = Point::new(2, 4);
    let path = map.find_path_large(&PathRequest::new(start, 40), 2, &[goblin])?;
    report("seek, 2x2 creature", &map, &path, &[(start, '@'), (goblin, 'T')]);

    let fear = Point::new(4, 7);
    let start = Point::new(6, 7);
    let path = map.find_flee_path(&PathRequest::new(start, 8), 1.2, &[fear])?;
    report("flee", &map, &path, &[(start, '@'), (fear, 'F')]);

    let archer = Point::new(1, 8);
    let range = AttackRange::new(3, 5);
    let req = PathRequest::new(archer, 30);
    let path = map.find_attack_path(&req, range, Some(&BresenhamLos), &[goblin])?;
    report("attack from range 3-5", &map, &path, &[(archer, '@'), (goblin, 'T')]);

    let sentry = Threat::new(Point::new(13, 1), 0, 8);
    let threats = [sentry, Threat::melee(goblin)];
    let vis = SightVisibility::new(BresenhamLos);
    let req = PathRequest::new(archer, 4);
    let path = map.find_covered_attack_path(&req, range, 1.0, &vis, false, &threats, &[goblin])?;
    report(
        "covered attack",
        &map,
        &path,
        &[(archer, '@'), (goblin, 'T'), (sentry.position, '!')],
    );

    let coins = [Point::new(11, 2), Point::new(17, 1), Point::new(7, 8)];
    if let Some(nearest) = map.find_nearest(hero, &coins)? {
        println!("== nearest coin to {hero}: {nearest}");
    }
    let path = map.find_shortcut_path(hero, &coins)?;
    let mut marks: Vec<(Point, char)> = coins.iter().map(|&c| (c, 'T')).collect();
    marks.push((hero, '@'));
    report("shortcut", &map, &path, &marks);

    let noise = map.flood_fill(4, &[Point::new(10, 5)])?;
    println!("== noise reaches {} cells within 4 steps", noise.len());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}
