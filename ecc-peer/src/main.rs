use anyhow::{bail, Context};
use dotenv::dotenv;
use ecc_core::config::load_curve;
use ecc_core::diffie_hellman::Exchange;
use ecc_core::dsa::{Signer, Verdict, Verifier};
use ecc_core::elgamal::{Recipient, Sender};
use ecc_core::{Channel, Curve, Keypair, Role};
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::time::Duration;

#[derive(StructOpt)]
#[structopt(about = "two-party elliptic curve protocols over TCP")]
enum Opt {
    #[structopt(about = "sign (alice) or verify (bob) a message")]
    Dsa {
        #[structopt(flatten)]
        peer: PeerOpt,
        #[structopt(
            long,
            default_value = "Ceci est un magnifique message de test.",
            help = "message signed by alice"
        )]
        message: String,
    },
    #[structopt(about = "agree on a shared point")]
    Dh {
        #[structopt(flatten)]
        peer: PeerOpt,
    },
    #[structopt(about = "decrypt (alice) or encrypt (bob) an integer")]
    Elgamal {
        #[structopt(flatten)]
        peer: PeerOpt,
        #[structopt(long, default_value = "42", help = "integer in [0, p) encrypted by bob")]
        plaintext: BigInt,
    },
}

#[derive(StructOpt)]
struct PeerOpt {
    #[structopt(
        long,
        conflicts_with = "bob",
        required_unless = "bob",
        help = "listen for the peer"
    )]
    alice: bool,
    #[structopt(long, help = "connect to the peer")]
    bob: bool,
    #[structopt(help = "address to listen on (alice) or connect to (bob)")]
    address: String,
    #[structopt(help = "tcp port")]
    port: u16,
    #[structopt(help = "curve parameter file")]
    curve: PathBuf,
    #[structopt(long, help = "socket read/write timeout in seconds")]
    timeout: Option<u64>,
}

impl PeerOpt {
    fn role(&self) -> Role {
        if self.alice {
            Role::Alice
        } else {
            Role::Bob
        }
    }

    fn connect(&self) -> anyhow::Result<Channel<TcpStream>> {
        let endpoint = format!("{}:{}", self.address, self.port);
        let stream = match self.role() {
            Role::Alice => {
                let listener = TcpListener::bind(&endpoint)
                    .with_context(|| format!("failed to listen on {}", endpoint))?;
                log::info!("listening on {}", endpoint);
                let (stream, remote) = listener.accept()?;
                log::info!("accepted connection from {}", remote);
                stream
            }
            Role::Bob => {
                let stream = TcpStream::connect(&endpoint)
                    .with_context(|| format!("failed to connect to {}", endpoint))?;
                log::info!("connected to {}", endpoint);
                stream
            }
        };
        if let Some(seconds) = self.timeout {
            let timeout = Some(Duration::from_secs(seconds));
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)?;
        }
        Ok(Channel::new(stream))
    }

    fn curve(&self) -> anyhow::Result<Curve> {
        load_curve(&self.curve)
            .with_context(|| format!("failed to load curve from {}", self.curve.display()))
    }
}

fn run_dsa(peer: &PeerOpt, message: String, rng: &mut StdRng) -> anyhow::Result<()> {
    let curve = peer.curve()?;
    let mut channel = peer.connect()?;
    match peer.role() {
        Role::Alice => {
            let mut message = message.into_bytes();
            message.push(0);
            let keypair = Keypair::random(&curve, rng);
            println!("public key: {}", keypair.public());
            let signer = Signer::new(curve, keypair)
                .publish(&mut channel, message)?
                .sign(&mut channel, rng)?;
            let signature = signer.signature();
            println!("u: {}\nv: {}", signature.u(), signature.v());
        }
        Role::Bob => {
            let verifier = Verifier::new(curve)
                .receive(&mut channel)?
                .verify(&mut channel)?;
            println!("public key: {}", verifier.public_key());
            println!("message: {}", String::from_utf8_lossy(verifier.message()));
            if let Verdict::Invalid(rejection) = verifier.verdict() {
                bail!("signature rejected: {}", rejection);
            }
            println!("signature is valid");
        }
    }
    Ok(())
}

fn run_dh(peer: &PeerOpt, rng: &mut StdRng) -> anyhow::Result<()> {
    let curve = peer.curve()?;
    let mut channel = peer.connect()?;
    let exchange = Exchange::new(curve, rng);
    println!("public point: {}", exchange.public_point());
    let secret = exchange.run(&mut channel, peer.role())?;
    println!("shared secret: {}", secret.point());
    Ok(())
}

fn run_elgamal(peer: &PeerOpt, plaintext: BigInt, rng: &mut StdRng) -> anyhow::Result<()> {
    let curve = peer.curve()?;
    let mut channel = peer.connect()?;
    match peer.role() {
        Role::Alice => {
            let recipient = Recipient::new(curve, rng);
            println!("public key: {}", recipient.public_key());
            recipient.publish(&mut channel)?;
            let plaintext = recipient.receive(&mut channel)?;
            println!("decrypted: {}", plaintext);
        }
        Role::Bob => {
            let sender = Sender::receive_key(curve, &mut channel)?;
            println!("recipient key: {}", sender.recipient_key());
            let ciphertext = sender.send(&mut channel, rng, &plaintext)?;
            println!("C1: {}\nC2: {}", ciphertext.c1(), ciphertext.c2());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut rng = StdRng::from_entropy();
    match Opt::from_args() {
        Opt::Dsa { peer, message } => run_dsa(&peer, message, &mut rng),
        Opt::Dh { peer } => run_dh(&peer, &mut rng),
        Opt::Elgamal { peer, plaintext } => run_elgamal(&peer, plaintext, &mut rng),
    }
}
