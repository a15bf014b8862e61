use genealogy_tools::mass_table::MassTable;
use genealogy_tools::{
    ancestors_of, children_of, find_terminal_hadrons, render_event, GeneratorRecord, ParticleDb,
    RenderContext, VisitationSet,
};
use std::collections::HashMap;
use std::io::Cursor;

const PARTICLES: &str = "\
25,H,boson,0
21,g,boson,0
2212,p+,baryon,1
5,b,quark,-1
-5,b~,quark,1
511,B0,meson,0
-511,B0~,meson,0
421,D0,meson,0
211,pi+,meson,1
-211,pi-,meson,-1
13,mu-,lepton,-1
-14,nu_mu~,lepton,0
22,gamma,boson,0
";

fn particle_db() -> ParticleDb {
    ParticleDb::from_reader(Cursor::new(PARTICLES)).expect("particle table")
}

fn render_to_string(record: &GeneratorRecord) -> String {
    let db = particle_db();
    let masses = MassTable::default();
    let mut out = Vec::new();
    render_event(record, &RenderContext::new(&db, &masses), &mut out).expect("render");
    String::from_utf8(out).expect("utf8")
}

/// Index printed on each line of a rendered tree.
fn rendered_indices(text: &str) -> Vec<usize> {
    text.lines()
        .map(|line| {
            let rest = line.split(" index = ").nth(1).expect("index field");
            rest.split(' ').next().unwrap().parse().unwrap()
        })
        .collect()
}

/// A realistic H -> b b~ event with hadronization, two incoming protons and
/// an unrelated photon root.
fn higgs_event() -> GeneratorRecord {
    GeneratorRecord::from_genealogy(
        905,
        vec![
            2212, 2212, 25, 5, -5, 511, -511, 421, 211, 13, -14, -211, 22,
        ],
        vec![-1, -1, 0, 2, 2, 3, 4, 5, 7, 6, 6, 7, -1],
    )
    .expect("valid record")
}

#[test]
fn scenario_a_meson_under_b_from_higgs() {
    let record = GeneratorRecord::from_genealogy(0, vec![25, 5, 511], vec![-1, 0, 1]).unwrap();
    assert_eq!(ancestors_of(2, &record).unwrap(), vec![1, 0]);
    assert_eq!(find_terminal_hadrons(&record, &particle_db()).unwrap(), vec![2]);
}

#[test]
fn scenario_b_hadron_daughter_moves_the_terminal() {
    let record =
        GeneratorRecord::from_genealogy(0, vec![25, 5, 511, 511], vec![-1, 0, 1, 2]).unwrap();
    assert_eq!(find_terminal_hadrons(&record, &particle_db()).unwrap(), vec![3]);
}

#[test]
fn scenario_c_two_roots_render_independently() {
    let record =
        GeneratorRecord::from_genealogy(0, vec![21, 5, 211, 21, 511], vec![-1, 0, 1, -1, 3])
            .unwrap();
    let text = render_to_string(&record);

    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        if line.starts_with("+->") || line.starts_with(' ') || line.starts_with('|') {
            blocks.last_mut().expect("tree started").push(line);
        } else {
            blocks.push(vec![line]);
        }
    }

    assert_eq!(blocks.len(), 2);
    assert_eq!(rendered_indices(&blocks[0].join("\n")), vec![0, 1, 2]);
    assert_eq!(rendered_indices(&blocks[1].join("\n")), vec![3, 4]);
}

#[test]
fn every_particle_rendered_exactly_once() {
    let record = higgs_event();
    let text = render_to_string(&record);
    let mut indices = rendered_indices(&text);
    indices.sort_unstable();
    assert_eq!(indices, (0..record.len()).collect::<Vec<_>>());

    let top_level: Vec<usize> = text
        .lines()
        .filter(|l| !l.contains("+->"))
        .flat_map(rendered_indices)
        .collect();
    assert_eq!(top_level, vec![0, 1, 12]);
}

#[test]
fn children_cover_each_non_root_once() {
    let record = higgs_event();
    let mut visited = VisitationSet::new();
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for mother in 0..record.len() {
        for daughter in children_of(mother, &mut visited, &record) {
            assert_eq!(record.mother(daughter), Some(mother));
            *counts.entry(daughter).or_default() += 1;
        }
    }
    assert!(counts.values().all(|&c| c == 1));
    let non_roots = (0..record.len()).filter(|&i| !record.is_root(i)).count();
    assert_eq!(counts.len(), non_roots);
}

#[test]
fn ancestor_chains_walk_to_the_root() {
    let record = higgs_event();
    for i in 0..record.len() {
        let chain = ancestors_of(i, &record).unwrap();
        let mut steps = 0;
        let mut current = i;
        while let Some(m) = record.mother(current) {
            assert_eq!(chain[steps], m);
            steps += 1;
            current = m;
        }
        assert_eq!(chain.len(), steps);
    }
}

#[test]
fn last_hadrons_of_higgs_event() {
    // b -> B0 -> D0 -> (pi+ pi-), b~ -> B0~ -> (mu- nu_mu~)
    let record = higgs_event();
    let db = particle_db();
    let first = find_terminal_hadrons(&record, &db).unwrap();
    assert_eq!(first, vec![6, 8, 11]);
    assert_eq!(find_terminal_hadrons(&record, &db).unwrap(), first);
}
