use fastq_stats::stats::Base;
use fastq_stats::FastqAnalyzer;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map_or("fastq-summary", String::as_str);
        eprintln!("Usage: {} <reads.fastq>", program);
        process::exit(2);
    }
    let path = &args[1];
    let mut analyzer = FastqAnalyzer::new(path);

    let stats = match analyzer.analyze_all() {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error while analyzing {}: {}", path, e);
            process::exit(1);
        }
    };
    let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("Sequences: {}", stats.summary.sequence_count);
    println!("Average length: {:.2} bp", stats.summary.average_length());
    println!("Total bases: {} bp", stats.summary.total_length);
    println!("File size: {:.2} MB", file_size as f64 / 1024.0 / 1024.0);

    let n_positions = stats.quality.len().max(stats.composition.len());
    if n_positions == 0 {
        return;
    }
    println!();
    println!("#Position\tMeanQuality\tA\tC\tG\tT");
    for i in 0..n_positions {
        let quality = stats.quality.mean(i).unwrap_or(0.0);
        let composition = stats.composition.at(i).copied().unwrap_or_default();
        let pcts: Vec<String> = Base::ALL
            .iter()
            .map(|b| format!("{:.2}", composition.get(*b)))
            .collect();
        println!("{}\t{:.2}\t{}", i + 1, quality, pcts.join("\t"));
    }
}
