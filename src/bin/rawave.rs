use anyhow::Result;
use bitvec::prelude::*;
use clap::{Parser, Subcommand};
use rawave::{
    raband::{
        encode::{
            decode_string, encode_string, format_bits, parse_bits, DecodeToBytes, EncodeFromBytes,
        },
        BasebandCodec, CodecConfig, ReceivedSignal,
    },
    rachan::{
        builtin::{CHANNEL_TABLE, DEFAULT_ETA, DEFAULT_MAX_DISTANCE, DEFAULT_SNR},
        ChannelConfig, ChannelSimulator,
    },
    raudio::Track,
};
use std::{fs, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Parser)]
#[clap(name = "rawave", version = "0.1.0", author = "Rawave")]
#[clap(about = "A command line interface for the rawave baseband codec and channel.", long_about = None)]
struct RawaveCli {
    #[clap(subcommand)]
    subcmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode bits from a file (or a text message) into a baseband WAV file.
    #[command(arg_required_else_help = true)]
    Encode {
        /// The file to encode.
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        source: Option<PathBuf>,
        /// Encodes this message instead of a file, one byte per character.
        #[clap(short, long)]
        text: Option<String>,
        /// The WAV file to write the baseband signal to.
        #[clap(short, long)]
        output: PathBuf,
        /// Interprets the file as a text file consisting of 1s and 0s.
        #[clap(short, long, default_value = "false")]
        chars: bool,
        /// The symbol duration in seconds.
        #[clap(short, long, default_value = "0.12")]
        duration: f64,
        /// The sample rate in Hz.
        #[clap(short, long, default_value = "35000")]
        rate: u32,
    },
    /// Pass a mono WAV file through a simulated open-air channel.
    ///
    /// The channel adds noise and an interfering tone in the audio band, so the input should be
    /// the baseband already modulated onto the channel's carrier. Demodulate the output to I/Q
    /// before passing it to `decode`.
    #[command(arg_required_else_help = true)]
    Simulate {
        /// The modulated WAV file to transmit.
        #[arg(required = true)]
        source: PathBuf,
        /// The WAV file to write the received signal to.
        #[clap(short, long)]
        output: PathBuf,
        /// The channel id.
        #[clap(long, default_value = "12")]
        channel: usize,
        /// The transmitter signal to noise ratio in dB.
        #[clap(long, default_value_t = DEFAULT_SNR)]
        snr: f64,
        /// The attenuation constant per metre.
        #[clap(long, default_value_t = DEFAULT_ETA)]
        eta: f64,
        /// The maximum propagation distance in metres.
        #[clap(long, default_value_t = DEFAULT_MAX_DISTANCE)]
        distance: f64,
        /// Seeds the channel randomness for reproducible runs.
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Decode bits from a baseband WAV file (mono) or an I/Q WAV file (stereo).
    #[command(arg_required_else_help = true)]
    Decode {
        /// The WAV file to decode.
        #[arg(required = true)]
        source: PathBuf,
        /// The file to write the decoded bits to.
        #[clap(short, long)]
        file: Option<PathBuf>,
        /// Writes the decoded bits as a text file consisting of 1s and 0s.
        #[clap(short, long, default_value = "false")]
        chars: bool,
        /// The symbol duration in seconds.
        #[clap(short, long, default_value = "0.12")]
        duration: f64,
    },
    /// List the channel plan.
    Channels,
}

#[derive(Error, Debug)]
enum RawaveError {
    #[error("Unsupported channel layout ({0} channels, expected {1})")]
    ChannelLayout(u16, &'static str),
}

fn load_bits(source: PathBuf, chars: bool) -> Result<BitVec> {
    let bits = if chars {
        parse_bits(&fs::read_to_string(source)?)?
    } else {
        fs::read(source)?.encode()
    };

    Ok(bits)
}

fn dump_bits(bits: BitVec, file: Option<PathBuf>, chars: bool) -> Result<()> {
    if let Some(file) = file {
        if chars {
            fs::write(file, format_bits(&bits))?;
        } else {
            fs::write(file, DecodeToBytes::decode(&bits))?;
        }
    } else {
        eprintln!("No output file specified. Write the bits to stdout.");
        println!("{}", format_bits(&bits));
        if !chars {
            println!("{}", decode_string(&bits));
        }
    }

    Ok(())
}

fn encode(bits: &BitSlice, output: PathBuf, duration: f64, rate: u32) -> Result<()> {
    let codec = BasebandCodec::new(CodecConfig::new(duration, rate as f64)?);
    let samples = codec.encode(bits);
    log::debug!(
        "Encoded {} bits into {} samples of {} samples per symbol",
        bits.len(),
        samples.len(),
        codec.config().pulse_len()
    );

    Track::mono(rate, samples).save_as(output)
}

fn simulate(
    source: PathBuf,
    output: PathBuf,
    channel: usize,
    config: ChannelConfig,
    seed: Option<u64>,
) -> Result<()> {
    let track = Track::open(source)?;
    if track.channels() != 1 {
        return Err(RawaveError::ChannelLayout(track.channels(), "1").into());
    }

    let mut simulator = match seed {
        Some(seed) => ChannelSimulator::seeded(config, seed),
        None => ChannelSimulator::from_entropy(config),
    };
    let rate = track.sample_rate();
    let received = simulator.simulate(track.samples(), rate as f64, channel)?;

    let realization = received.realization;
    eprintln!(
        "Distance {:.3} m, delay {} samples, gain {:.4}, noise variance {:.4}",
        realization.distance, realization.delay, realization.gain, realization.noise_variance
    );
    if let Some(interference) = realization.interference {
        eprintln!(
            "Interference from channel {} at {} Hz with amplitude {:.3}",
            interference.channel_id, interference.frequency, interference.amplitude
        );
    }

    Track::mono(rate, received.samples).save_as(output)
}

fn decode(source: PathBuf, duration: f64) -> Result<BitVec> {
    let track = Track::open(source)?;
    let received = match track.channels() {
        1 => ReceivedSignal::from_baseband(track.samples()),
        2 => ReceivedSignal::from_iq(&track.to_iq()?),
        channels => return Err(RawaveError::ChannelLayout(channels, "1 or 2").into()),
    };

    let codec = BasebandCodec::new(CodecConfig::new(duration, track.sample_rate() as f64)?);
    Ok(codec.decode(&received)?)
}

fn list_channels() {
    println!("{:>4} {:>10} {:>10} {:>10} {:>6}", "id", "lower", "upper", "center", "dBm");
    for (id, channel) in CHANNEL_TABLE.iter() {
        println!(
            "{:>4} {:>10.1} {:>10.1} {:>10.1} {:>6.1}",
            id,
            channel.lower,
            channel.upper,
            channel.center(),
            channel.max_power
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = RawaveCli::parse();
    match cli.subcmd {
        Commands::Encode {
            source,
            text,
            output,
            chars,
            duration,
            rate,
        } => {
            let bits = match (text, source) {
                (Some(text), _) => encode_string(&text)?,
                (None, Some(source)) => load_bits(source, chars)?,
                (None, None) => bitvec![],
            };
            encode(&bits, output, duration, rate)?;
        }
        Commands::Simulate {
            source,
            output,
            channel,
            snr,
            eta,
            distance,
            seed,
        } => {
            let config = ChannelConfig::new(snr, eta, distance)?;
            simulate(source, output, channel, config, seed)?;
        }
        Commands::Decode {
            source,
            file,
            chars,
            duration,
        } => {
            let bits = decode(source, duration)?;
            dump_bits(bits, file, chars)?;
        }
        Commands::Channels => list_channels(),
    }
    Ok(())
}
